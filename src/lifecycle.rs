/// What the frame loop should do on a `pagehide`/`pageshow` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTransition {
    /// Page went into the back/forward cache; keep GPU resources.
    Suspend,
    /// Page is being unloaded for good.
    Dispose,
    /// Page came back out of the back/forward cache.
    Resume,
    /// First load; the loop is already running.
    Ignore,
}

pub fn on_page_hide(persisted: bool) -> PageTransition {
    if persisted {
        PageTransition::Suspend
    } else {
        PageTransition::Dispose
    }
}

pub fn on_page_show(persisted: bool) -> PageTransition {
    if persisted {
        PageTransition::Resume
    } else {
        PageTransition::Ignore
    }
}
