use tui_textarea::Input;

use super::Message;
use super::MessageUpdate;

pub enum Event {
    AnswerPending(String),
    AnswerReceived(MessageUpdate),
    ConversationReady(Message),
    GateDenied(),
    GateOpened(),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardPaste(String),
    UIResize(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
