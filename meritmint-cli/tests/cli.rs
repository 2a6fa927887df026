use chrono::{TimeZone, Utc};

use meritmint_cli::certificate::render_certificate;
use meritmint_registry::state::{AchievementDraft, AchievementRecord, Attribute};

fn record() -> AchievementRecord {
    AchievementRecord {
        token_id: "4242".to_string(),
        name: "Hackathon X".to_string(),
        description: "Led a winning team.".to_string(),
        attributes: vec![
            Attribute::new("Type", "Hackathon"),
            Attribute::new("Role", "Team Lead"),
            Attribute::new("Technologies", "React, Solidity"),
            Attribute::new("Date", "March 2024"),
        ],
        transaction_hash: format!("0x{}", "ab".repeat(32)),
        minted_at: Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap(),
        owner: "0xDEADBEEF00000000000000000000000000000001".to_string(),
        ipfs_hash: Some("QmExampleCid".to_string()),
    }
}

#[test]
fn test_certificate_contains_record_fields() {
    let html = render_certificate(&record());
    assert!(html.contains("Hackathon X"));
    assert!(html.contains("Led a winning team."));
    assert!(html.contains("<th>Technologies</th><td>React, Solidity</td>"));
    assert!(html.contains("Token #4242"));
    assert!(html.contains(&format!("0x{}", "ab".repeat(32))));
    assert!(html.contains("https://QmExampleCid.ipfs.w3s.link"));
}

#[test]
fn test_certificate_escapes_markup() {
    let mut rec = record();
    rec.name = "Best <script> Award & More".to_string();
    let html = render_certificate(&rec);
    assert!(html.contains("Best &lt;script&gt; Award &amp; More"));
    assert!(!html.contains("<script>"));
}

#[test]
fn test_certificate_omits_gateway_link_without_cid() {
    let mut rec = record();
    rec.ipfs_hash = None;
    let html = render_certificate(&rec);
    assert!(!html.contains("ipfs.w3s.link"));
}

#[test]
fn test_draft_file_wire_shape() {
    // The draft shape the generate/mint commands accept from disk.
    let raw = r#"{
        "title": "Rustconf Workshop",
        "type": "Workshop",
        "date": "2025-09-02",
        "role": "Attendee",
        "technologies": ["Rust"],
        "owner": "0x0123456789abcdef",
        "comment": "great sessions"
    }"#;
    let draft: AchievementDraft = serde_json::from_str(raw).unwrap();
    assert_eq!(draft.achievement_type.as_str(), "Workshop");
    assert_eq!(draft.participant, None);
    assert_eq!(draft.comment.as_deref(), Some("great sessions"));
}
