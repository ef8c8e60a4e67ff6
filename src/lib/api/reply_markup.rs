use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardButton {
    /// Text of the button. It will be sent as a message when the button is pressed
    pub text: String,
}

impl<T: Into<String>> From<T> for KeyboardButton {
    fn from(text: T) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    /// Label text on the button
    pub text: String,

    /// HTTP or tg:// url to be opened when button is pressed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Callback data to be sent in a callback query to the bot when button is pressed, 1-64 bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl<T: Into<String>> From<T> for InlineKeyboardButton {
    fn from(text: T) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

impl InlineKeyboardButton {
    pub fn with_callback_data<T: Into<String>>(mut self, callback_data: T) -> Self {
        self.callback_data = Some(callback_data.into());
        self
    }

    pub fn with_url<T: Into<String>>(mut self, url: T) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Telegram tells the markup kinds apart by their fields, so this is untagged
/// on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    InlineKeyboardMarkup {
        /// Array of button rows, each represented by an Array of InlineKeyboardButton objects
        inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
    },
    ReplyKeyboardMarkup {
        /// Array of button rows, each represented by an Array of KeyboardButton objects
        keyboard: Vec<Vec<KeyboardButton>>,

        /// Requests clients to resize the keyboard vertically for optimal fit
        #[serde(default)]
        resize_keyboard: bool,
    },
}

impl ReplyMarkup {
    pub fn inline_keyboard_markup(inline_keyboard: Vec<Vec<InlineKeyboardButton>>) -> ReplyMarkup {
        ReplyMarkup::InlineKeyboardMarkup { inline_keyboard }
    }

    pub fn reply_keyboard_markup(
        keyboard: Vec<Vec<KeyboardButton>>,
        resize_keyboard: bool,
    ) -> ReplyMarkup {
        ReplyMarkup::ReplyKeyboardMarkup {
            keyboard,
            resize_keyboard,
        }
    }
}
