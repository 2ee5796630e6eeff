mod editor_state;
mod session;

pub use editor_state::{EditorState, EndpointHandle};
pub use session::EditingSession;
