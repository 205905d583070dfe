//! WebSocket client that uploads program text to the game server.

use std::rc::Rc;

use gloo_events::EventListener;
use robasm_editor_core::{Envelope, OverlayError, SmolStr, SocketError};
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, HtmlTextAreaElement, MessageEvent, WebSocket};

use crate::dom::{document, element_by_id, js_message};

/// An open (or opening) connection. Incoming messages are only logged.
pub struct CodeSocket {
    socket: WebSocket,
    url: SmolStr,
    _listeners: Vec<EventListener>,
}

impl CodeSocket {
    pub fn connect(url: &str) -> Result<Self, SocketError> {
        let socket = WebSocket::new(url).map_err(|err| SocketError::Connect {
            url: url.to_string(),
            message: js_message(&err),
        })?;
        let url = SmolStr::new(url);

        let on_open = {
            let url = url.clone();
            EventListener::new(&socket, "open", move |_event| {
                tracing::info!(%url, "socket open");
            })
        };
        let on_message = EventListener::new(&socket, "message", |event| {
            let Some(event) = event.dyn_ref::<MessageEvent>() else {
                return;
            };
            let Some(text) = event.data().as_string() else {
                tracing::debug!("ignoring non-text socket message");
                return;
            };
            match Envelope::from_json(&text) {
                Ok(envelope) => {
                    tracing::info!(kind = ?envelope.kind, data = %envelope.data, "socket message")
                }
                Err(_) => tracing::info!(%text, "socket message"),
            }
        });
        let on_close = {
            let url = url.clone();
            EventListener::new(&socket, "close", move |event| {
                match event.dyn_ref::<CloseEvent>() {
                    Some(close) => tracing::info!(
                        %url,
                        code = close.code(),
                        reason = %close.reason(),
                        clean = close.was_clean(),
                        "socket closed"
                    ),
                    None => tracing::info!(%url, "socket closed"),
                }
            })
        };
        let on_error = {
            let url = url.clone();
            EventListener::new(&socket, "error", move |_event| {
                tracing::warn!(%url, "socket error");
            })
        };

        tracing::debug!(%url, "socket connecting");

        Ok(Self {
            socket,
            url,
            _listeners: vec![on_open, on_message, on_close, on_error],
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn ready_state(&self) -> u16 {
        self.socket.ready_state()
    }

    pub fn is_open(&self) -> bool {
        self.ready_state() == WebSocket::OPEN
    }

    /// Collapse blank-line runs in `text` and send it as an upload envelope.
    pub fn send_code(&self, text: &str) -> Result<(), SocketError> {
        let ready_state = self.ready_state();
        if ready_state != WebSocket::OPEN {
            return Err(SocketError::NotOpen { ready_state });
        }

        let json = Envelope::upload(text).to_json()?;
        self.socket
            .send_with_str(&json)
            .map_err(|err| SocketError::Send(js_message(&err)))?;
        tracing::debug!(bytes = json.len(), "code uploaded");
        Ok(())
    }
}

impl Drop for CodeSocket {
    fn drop(&mut self) {
        if let Err(err) = self.socket.close() {
            tracing::warn!(url = %self.url, error = %js_message(&err), "failed to close socket");
        }
    }
}

/// A "convert" button that uploads the textarea's content on click.
pub struct ConvertButton {
    _listener: EventListener,
}

impl ConvertButton {
    pub fn bind(
        button_id: &str,
        input_id: &str,
        socket: Rc<CodeSocket>,
    ) -> Result<Self, OverlayError> {
        let document = document()?;
        let button = element_by_id::<web_sys::HtmlElement>(&document, button_id, "HTML element")?;
        let input = element_by_id::<HtmlTextAreaElement>(&document, input_id, "textarea")?;

        let listener = EventListener::new(&button, "click", move |_event| {
            if let Err(err) = socket.send_code(&input.value()) {
                tracing::warn!(error = %err, "code upload failed");
            }
        });
        Ok(Self {
            _listener: listener,
        })
    }
}
