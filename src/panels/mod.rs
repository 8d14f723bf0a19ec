mod central_panel;
mod notice_toast;
mod text_editor;
mod tools_panel;
mod top_bar;

pub use central_panel::central_panel;
pub use notice_toast::notice_toast;
pub use text_editor::text_editor;
pub use tools_panel::tools_panel;
pub use top_bar::top_bar;
