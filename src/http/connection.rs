use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::fs::{FileHandler, Outcome};
use crate::http::parser::read_request;
use crate::http::request::Request;

/// One connection, one request.
pub struct Connection<S> {
    reader: BufReader<S>,
    handler: Arc<FileHandler>,
    ready_timeout: Duration,
    state: ConnectionState,
}

#[derive(Debug)]
pub enum ConnectionState {
    Received,
    Dispatched(Request),
    Responded(Outcome),
    Errored,
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<FileHandler>, ready_timeout: Duration) -> Self {
        Self {
            reader: BufReader::new(stream),
            handler,
            ready_timeout,
            state: ConnectionState::Received,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Drives the connection to a terminal state and closes it.
    ///
    /// Returns `Ok(None)` for an empty connection. On error nothing more is
    /// written; the connection is closed and the error handed back.
    pub async fn run(&mut self) -> anyhow::Result<Option<Outcome>> {
        loop {
            match &self.state {
                ConnectionState::Responded(outcome) => {
                    let outcome = *outcome;
                    self.close().await;
                    return Ok(Some(outcome));
                }
                ConnectionState::Closed => {
                    self.close().await;
                    return Ok(None);
                }
                ConnectionState::Errored => {
                    anyhow::bail!("connection already failed");
                }
                _ => {}
            }

            if let Err(e) = self.advance().await {
                self.state = ConnectionState::Errored;
                self.close().await;
                return Err(e);
            }
        }
    }

    async fn advance(&mut self) -> anyhow::Result<()> {
        match std::mem::replace(&mut self.state, ConnectionState::Errored) {
            ConnectionState::Received => {
                self.state = match read_request(&mut self.reader, self.ready_timeout).await? {
                    Some(req) => ConnectionState::Dispatched(req),
                    None => {
                        tracing::debug!("Empty connection, closing without response");
                        ConnectionState::Closed
                    }
                };
            }
            ConnectionState::Dispatched(mut req) => {
                let outcome = self.handler.handle(&mut req, &mut self.reader).await?;
                tracing::info!(
                    method = %req.method,
                    path = %req.path,
                    status = outcome.status.as_u16(),
                    "Request served"
                );
                self.state = ConnectionState::Responded(outcome);
            }
            terminal => self.state = terminal,
        }
        Ok(())
    }

    async fn close(&mut self) {
        if let Err(e) = self.reader.get_mut().shutdown().await {
            tracing::trace!(error = %e, "Shutdown after response failed");
        }
    }
}
