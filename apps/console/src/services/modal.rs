/// Where a click inside the modal landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalClick {
    Backdrop,
    Content,
    CloseButton,
}

/// The single "complete case" dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalController {
    visible: bool,
    record_id: Option<String>,
}

impl ModalController {
    pub fn open(&mut self, record_id: impl Into<String>) {
        self.record_id = Some(record_id.into());
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[cfg(test)]
    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Form target for the bound record.
    pub fn form_action(&self) -> Option<String> {
        self.record_id
            .as_deref()
            .map(|id| format!("/complete-case/{}", id.trim()))
    }

    /// Returns `true` if the click closed the modal.
    pub fn handle_click(&mut self, target: ModalClick) -> bool {
        match target {
            ModalClick::Backdrop | ModalClick::CloseButton if self.visible => {
                self.close();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_binds_form_action() {
        let mut modal = ModalController::default();
        assert_eq!(modal.form_action(), None);

        modal.open("8c1d-22");
        assert!(modal.is_visible());
        assert_eq!(modal.form_action().as_deref(), Some("/complete-case/8c1d-22"));
    }

    #[test]
    fn reopening_overwrites_binding() {
        let mut modal = ModalController::default();
        modal.open("first");
        modal.close();
        modal.open("second");
        assert_eq!(modal.record_id(), Some("second"));
        assert_eq!(modal.form_action().as_deref(), Some("/complete-case/second"));
    }

    #[test]
    fn content_clicks_keep_modal_open() {
        let mut modal = ModalController::default();
        modal.open("42");

        assert!(!modal.handle_click(ModalClick::Content));
        assert!(modal.is_visible());

        assert!(modal.handle_click(ModalClick::Backdrop));
        assert!(!modal.is_visible());
        assert!(!modal.handle_click(ModalClick::CloseButton));
    }
}
