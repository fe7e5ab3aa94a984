/// Widths below this are treated as mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SidebarState {
    open: bool,
    viewport_width: f64,
}

impl SidebarState {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            open: false,
            viewport_width,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport_width < MOBILE_BREAKPOINT_PX
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn click_outside(&mut self) {
        self.open = false;
    }

    pub fn nav_link_clicked(&mut self) {
        if self.is_mobile() {
            self.open = false;
        }
    }

    /// Closes the panel when the viewport grows past the breakpoint.
    pub fn resized(&mut self, width: f64) {
        let was_mobile = self.is_mobile();
        self.viewport_width = width;
        if was_mobile && !self.is_mobile() {
            self.open = false;
        }
    }
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new(MOBILE_BREAKPOINT_PX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_toggles() {
        let mut sidebar = SidebarState::new(1_280.0);
        sidebar.toggle();
        assert!(sidebar.is_open());
        sidebar.toggle();
        assert!(!sidebar.is_open());
    }

    #[test]
    fn nav_links_close_only_on_mobile() {
        let mut desktop = SidebarState::new(1_280.0);
        desktop.toggle();
        desktop.nav_link_clicked();
        assert!(desktop.is_open());

        let mut phone = SidebarState::new(390.0);
        phone.toggle();
        phone.nav_link_clicked();
        assert!(!phone.is_open());
    }

    #[test]
    fn growing_past_breakpoint_closes() {
        let mut sidebar = SidebarState::new(600.0);
        sidebar.toggle();
        sidebar.resized(700.0);
        assert!(sidebar.is_open());
        sidebar.resized(1_024.0);
        assert!(!sidebar.is_open());

        sidebar.toggle();
        sidebar.resized(500.0);
        assert!(sidebar.is_open());
    }

    #[test]
    fn outside_click_closes() {
        let mut sidebar = SidebarState::new(390.0);
        sidebar.toggle();
        sidebar.click_outside();
        assert!(!sidebar.is_open());
    }
}
