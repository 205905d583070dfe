use std::rc::Rc;

use robasm_editor_browser::{CodeSocket, ConvertButton};
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// WebSocket connection that uploads program text.
#[wasm_bindgen]
pub struct JsCodeSocket {
    socket: Rc<CodeSocket>,
    buttons: Vec<ConvertButton>,
}

#[wasm_bindgen]
impl JsCodeSocket {
    #[wasm_bindgen(constructor)]
    pub fn connect(url: &str) -> Result<JsCodeSocket, JsError> {
        let socket = CodeSocket::connect(url).map_err(to_js_error)?;
        Ok(Self {
            socket: Rc::new(socket),
            buttons: Vec::new(),
        })
    }

    /// Send `text` as an upload. Throws if the socket is not open yet.
    #[wasm_bindgen(js_name = sendCode)]
    pub fn send_code(&self, text: &str) -> Result<(), JsError> {
        self.socket.send_code(text).map_err(to_js_error)
    }

    /// Upload the textarea `#inputId` whenever `#buttonId` is clicked.
    #[wasm_bindgen(js_name = bindConvertButton)]
    pub fn bind_convert_button(&mut self, button_id: &str, input_id: &str) -> Result<(), JsError> {
        let button =
            ConvertButton::bind(button_id, input_id, self.socket.clone()).map_err(to_js_error)?;
        self.buttons.push(button);
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = readyState)]
    pub fn ready_state(&self) -> u16 {
        self.socket.ready_state()
    }

    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.socket.is_open()
    }
}
