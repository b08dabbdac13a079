use crate::models::QaPair;

/// Where a session writes what the user sees.
pub trait StatusView {
    fn set_upload_status(&mut self, text: &str);
    fn show_qa_section(&mut self);
    fn set_answer(&mut self, text: &str);
    fn set_batch_status(&mut self, text: &str);
    fn show_batch_results(&mut self, pairs: &[QaPair]);
}

/// Prints every update to stdout.
#[derive(Debug, Default)]
pub struct TerminalView {
    qa_visible: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusView for TerminalView {
    fn set_upload_status(&mut self, text: &str) {
        println!("{}", text);
    }

    fn show_qa_section(&mut self) {
        if !self.qa_visible {
            println!("\n💬 Ask questions about the document (:batch for several, :quit to exit)");
        }
        self.qa_visible = true;
    }

    fn set_answer(&mut self, text: &str) {
        println!("{}", text);
    }

    fn set_batch_status(&mut self, text: &str) {
        println!("{}", text);
    }

    fn show_batch_results(&mut self, pairs: &[QaPair]) {
        for pair in pairs {
            println!("{}", pair);
        }
    }
}
