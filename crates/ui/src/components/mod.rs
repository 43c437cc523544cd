mod completion_button;
mod copy_button;
mod hint_accordion;
pub(crate) mod scripts;
mod sidebar;

pub use completion_button::CompletionButton;
pub use copy_button::CopyButton;
pub use hint_accordion::HintAccordion;
pub use sidebar::TaskSidebar;
