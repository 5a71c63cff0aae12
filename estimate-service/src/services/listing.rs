//! Conversion of stored inquiries into listing responses.

use crate::models::{
    EventResponse, InquiryRecord, InquiryResponse, OrderedEstimateResponse, Screen, ScreenResponse,
};

fn screen_response(screen: &Screen) -> ScreenResponse {
    ScreenResponse {
        id: screen.id,
        title: screen.title.clone(),
        catchphrase: screen.catchphrase.clone().unwrap_or_default(),
        description: screen.description.clone().unwrap_or_default(),
        preview: screen.preview.clone().unwrap_or_default(),
    }
}

/// Inquiry with nullable text fields replaced by empty strings.
pub fn inquiry_response(record: &InquiryRecord) -> InquiryResponse {
    let estimate = &record.estimate;
    InquiryResponse {
        id: estimate.id,
        name: estimate.name.clone(),
        email: estimate.email.clone(),
        inquiry: estimate.inquiry.clone(),
        answers: estimate.answers.clone().unwrap_or_default(),
        status: estimate.status,
        screens: record.screens.iter().map(screen_response).collect(),
        events: record
            .events
            .iter()
            .map(|event| EventResponse {
                id: event.id,
                name: event.name.clone(),
                screen: event.screen.clone(),
                process: event.process.clone(),
            })
            .collect(),
        created_at: estimate.created_at,
    }
}

/// Screens of one inquiry with repeated titles collapsed.
///
/// Of screens sharing a title the one with more non-empty descriptive
/// fields is kept; on a tie the earliest stays. Each title keeps the
/// position of its first occurrence.
pub fn dedupe_screens(screens: &[Screen]) -> Vec<&Screen> {
    let mut kept: Vec<&Screen> = Vec::new();
    for screen in screens {
        match kept.iter_mut().find(|k| k.title == screen.title) {
            Some(existing) if screen.richness() > existing.richness() => *existing = screen,
            Some(_) => {}
            None => kept.push(screen),
        }
    }
    kept
}

/// One row per distinct screen of every accepted inquiry.
pub fn ordered_estimates(records: &[InquiryRecord]) -> Vec<OrderedEstimateResponse> {
    records
        .iter()
        .flat_map(|record| {
            let estimate = &record.estimate;
            dedupe_screens(&record.screens)
                .into_iter()
                .map(move |screen| OrderedEstimateResponse {
                    id: estimate.id,
                    name: estimate.name.clone(),
                    email: estimate.email.clone(),
                    inquiry: estimate.inquiry.clone(),
                    status: estimate.status,
                    screen: screen_response(screen),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Estimate, EstimateStatus};
    use chrono::Utc;

    fn screen(id: i64, title: &str, catchphrase: Option<&str>, preview: Option<&str>) -> Screen {
        Screen {
            id,
            estimate_id: 1,
            title: title.to_string(),
            catchphrase: catchphrase.map(str::to_string),
            description: None,
            preview: preview.map(str::to_string),
        }
    }

    fn record(screens: Vec<Screen>) -> InquiryRecord {
        InquiryRecord {
            estimate: Estimate {
                id: 1,
                name: "山田".to_string(),
                email: "yamada@example.com".to_string(),
                inquiry: "相談".to_string(),
                answers: None,
                status: EstimateStatus::Accepted,
                requirements_specification: None,
                requirements_definition: None,
                screens: None,
                estimate_develop: None,
                created_at: Utc::now(),
            },
            screens,
            events: Vec::new(),
        }
    }

    #[test]
    fn null_fields_become_empty_strings() {
        let response = inquiry_response(&record(vec![screen(1, "ログイン", None, None)]));
        assert_eq!(response.answers, "");
        assert_eq!(response.screens[0].catchphrase, "");
        assert_eq!(response.screens[0].preview, "");
    }

    #[test]
    fn richer_duplicate_replaces_earlier_one() {
        let screens = vec![
            screen(1, "ログイン", None, None),
            screen(2, "一覧", Some("見やすい"), None),
            screen(3, "ログイン", Some("安全"), Some("<div></div>")),
        ];
        let kept = dedupe_screens(&screens);
        assert_eq!(kept.iter().map(|s| s.id).collect::<Vec<_>>(), vec![3, 2]);
    }

    #[test]
    fn tie_keeps_first_inserted() {
        let screens = vec![
            screen(1, "ログイン", Some("a"), None),
            screen(2, "ログイン", None, Some("<p></p>")),
        ];
        assert_eq!(dedupe_screens(&screens)[0].id, 1);
    }

    #[test]
    fn ordered_estimates_emit_one_row_per_distinct_screen() {
        let rows = ordered_estimates(&[record(vec![
            screen(1, "ログイン", None, None),
            screen(2, "ログイン", None, None),
            screen(3, "一覧", None, None),
        ])]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].screen.id, 1);
        assert_eq!(rows[1].screen.title, "一覧");
        assert_eq!(rows[0].status, EstimateStatus::Accepted);
    }
}
