use leptos::prelude::*;

use super::use_portfolio;
use crate::presenter::notify::{NoticePhase, NoticeView};

fn classes(notice: Option<&NoticeView>) -> String {
    let Some(notice) = notice else {
        return "notification".to_string();
    };
    let phase = match notice.phase {
        NoticePhase::Shown => " show",
        NoticePhase::Entering | NoticePhase::Leaving => "",
    };
    format!("notification {}{phase}", notice.kind.class())
}

/// One banner element that slides in and out as the notice changes phase.
#[component]
pub fn Notifications() -> impl IntoView {
    let portfolio = use_portfolio();

    view! {
        <div data-fixed="" class="fixed top-20 right-4 z-50 overflow-hidden pointer-events-none">
            <div
                class=move || portfolio.view.with(|v| classes(v.notice.as_ref()))
                role="status"
                aria-live="polite"
            >
                {move || {
                    portfolio
                        .view
                        .with(|v| v.notice.as_ref().map(|n| n.message.clone()).unwrap_or_default())
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::notify::NoticeKind;

    #[test]
    fn test_classes_follow_phase() {
        let mut notice = NoticeView {
            id: 1,
            kind: NoticeKind::Error,
            message: "missing".to_string(),
            phase: NoticePhase::Entering,
        };
        assert_eq!(classes(Some(&notice)), "notification error");
        notice.phase = NoticePhase::Shown;
        assert_eq!(classes(Some(&notice)), "notification error show");
        assert_eq!(classes(None), "notification");
    }
}
