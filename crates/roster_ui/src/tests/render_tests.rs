use super::*;
use shared::domain::Activity;

fn activity(description: &str, max: i64, participants: &[&str]) -> Activity {
    Activity {
        description: description.to_string(),
        schedule: "Tuesdays, 4:00 PM".to_string(),
        max_participants: max,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

fn sample_snapshot() -> RosterSnapshot {
    [
        (
            ActivityName::from("Chess Club"),
            activity("Strategy", 12, &["michael@mergington.edu", "amy@example.com"]),
        ),
        (ActivityName::from("Drama"), activity("Stage", 2, &[])),
        (
            ActivityName::from("Gym"),
            activity("Overbooked", 1, &["a@x.com", "b@x.com"]),
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn one_option_and_one_card_per_activity_in_order() {
    let view = render_roster(&sample_snapshot());

    assert_eq!(view.options.len(), 4);
    assert_eq!(view.options[0], SelectOption::placeholder());
    let option_values: Vec<&str> = view.options[1..].iter().map(|o| o.value.as_str()).collect();
    assert_eq!(option_values, vec!["Chess Club", "Drama", "Gym"]);

    let card_names: Vec<&str> = view.cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(card_names, vec!["Chess Club", "Drama", "Gym"]);
}

#[test]
fn empty_roster_renders_only_the_placeholder() {
    let view = render_roster(&RosterSnapshot::new());
    assert_eq!(view.options, vec![SelectOption::placeholder()]);
    assert!(view.cards.is_empty());
}

#[test]
fn spots_left_may_go_negative() {
    let view = render_roster(&sample_snapshot());
    let spots: Vec<i64> = view.cards.iter().map(|c| c.spots_left).collect();
    assert_eq!(spots, vec![10, 2, -1]);
    assert!(card_markup(&view.cards[2], |_| false).contains("-1 spots left"));
}

#[test]
fn rows_bind_to_exact_activity_and_email() {
    let view = render_roster(&sample_snapshot());
    let rows = view.cards[0].rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].initials, "AM");
    assert_eq!(
        rows[1].unregister,
        UnregisterBinding::new("Chess Club", "amy@example.com")
    );
    assert_eq!(rows[1].unregister.aria_label(), "Unregister amy@example.com");
    assert_eq!(view.cards[1].participants, ParticipantSection::Empty);
}

#[test]
fn rendering_is_deterministic() {
    let snapshot = sample_snapshot();
    assert_eq!(render_roster(&snapshot), render_roster(&snapshot));
}

#[test]
fn escape_html_maps_all_special_characters() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
    );
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn server_strings_never_reach_markup_raw() {
    let hostile = "<script>alert('x')</script>";
    let snapshot: RosterSnapshot = [(
        ActivityName::from("<b>Club</b>"),
        Activity {
            description: hostile.to_string(),
            schedule: r#"Mon "late" & Tue"#.to_string(),
            max_participants: 3,
            participants: vec![r#"<img src=x onerror="1">@evil.com"#.to_string()],
        },
    )]
    .into_iter()
    .collect();

    let view = render_roster(&snapshot);
    let html = card_markup(&view.cards[0], |_| false);

    assert!(!html.contains("<script>"));
    assert!(!html.contains("<b>Club</b>"));
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
    assert!(html.contains("Mon &quot;late&quot; &amp; Tue"));
    assert!(html.contains(r#"data-email="&lt;img src=x onerror=&quot;1&quot;&gt;@evil.com""#));

    // The binding itself keeps the raw value for the request.
    assert_eq!(
        view.cards[0].rows()[0].unregister.email,
        r#"<img src=x onerror="1">@evil.com"#
    );

    let option = option_markup(&view.options[1], false);
    assert_eq!(
        option,
        r#"<option value="&lt;b&gt;Club&lt;/b&gt;">&lt;b&gt;Club&lt;/b&gt;</option>"#
    );
}

#[test]
fn empty_participants_use_placeholder_section() {
    let view = render_roster(&sample_snapshot());
    let html = card_markup(&view.cards[1], |_| false);
    assert!(html.contains(r#"<div class="participants empty">No participants yet</div>"#));
    assert!(!html.contains("<ul>"));
}

#[test]
fn disabled_controls_are_marked() {
    let view = render_roster(&sample_snapshot());
    let target = UnregisterBinding::new("Chess Club", "amy@example.com");
    let html = card_markup(&view.cards[0], |binding| *binding == target);
    assert_eq!(html.matches(" disabled>").count(), 1);
    assert!(html.contains(r#"data-email="amy@example.com" disabled>"#));
}
