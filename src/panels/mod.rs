mod calibration_prompt;
mod central_panel;
mod measurements_panel;
mod tools_panel;

pub use calibration_prompt::calibration_prompt;
pub use central_panel::central_panel;
pub use measurements_panel::measurements_panel;
pub use tools_panel::tools_panel;
