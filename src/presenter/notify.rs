const ENTER_AFTER: f64 = 100.0;
const LEAVE_FOR: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    /// Rendered off-screen.
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub phase: NoticePhase,
}

#[derive(Debug, Clone)]
struct Notice {
    id: u64,
    kind: NoticeKind,
    message: String,
    shown_at: f64,
}

/// A single transient banner. Showing a new one replaces the current one.
#[derive(Debug)]
pub struct Notifier {
    current: Option<Notice>,
    next_id: u64,
    hold: f64,
}

impl Notifier {
    pub fn new(hold: f64) -> Self {
        Self {
            current: None,
            next_id: 0,
            hold,
        }
    }

    pub fn show(&mut self, kind: NoticeKind, message: impl Into<String>, now: f64) -> u64 {
        self.next_id += 1;
        let notice = Notice {
            id: self.next_id,
            kind,
            message: message.into(),
            shown_at: now,
        };
        log::debug!("notice {}: {}", notice.id, notice.message);
        self.current = Some(notice);
        self.next_id
    }

    fn phase(&self, notice: &Notice, now: f64) -> Option<NoticePhase> {
        let age = now - notice.shown_at;
        if age < ENTER_AFTER {
            Some(NoticePhase::Entering)
        } else if age < self.hold {
            Some(NoticePhase::Shown)
        } else if age < self.hold + LEAVE_FOR {
            Some(NoticePhase::Leaving)
        } else {
            None
        }
    }

    /// Drops the banner once it has slid out.
    pub fn tick(&mut self, now: f64) {
        if let Some(notice) = &self.current {
            if self.phase(notice, now).is_none() {
                self.current = None;
            }
        }
    }

    pub fn view(&self, now: f64) -> Option<NoticeView> {
        let notice = self.current.as_ref()?;
        Some(NoticeView {
            id: notice.id,
            kind: notice.kind,
            message: notice.message.clone(),
            phase: self.phase(notice, now)?,
        })
    }
}
