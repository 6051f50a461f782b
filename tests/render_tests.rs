use serde_json::json;

use wathiq_report::assets::{FontFace, ResolvedAssets};
use wathiq_report::error::ReportError;
use wathiq_report::report::{build_document, parse_report};

fn stub_assets() -> ResolvedAssets {
    ResolvedAssets {
        font_regular: FontFace {
            data_uri: "data:font/otf;base64,cmVndWxhcg==".to_owned(),
            css_format: "opentype",
        },
        font_bold: FontFace {
            data_uri: "data:font/ttf;base64,Ym9sZA==".to_owned(),
            css_format: "truetype",
        },
        logo_src: String::new(),
    }
}

fn render(payload: serde_json::Value) -> String {
    let doc = parse_report(&payload).unwrap();
    build_document(&doc, &stub_assets()).unwrap()
}

#[test]
fn empty_sections_render_without_entries() {
    let html = render(json!({
        "date": "2026-08-06",
        "finance": { "entries": [] },
        "sales": { "entries": [] },
        "operations": { "entries": [] },
        "marketing": { "tasks": [] }
    }));

    assert!(html.contains("القسم المالي"));
    assert!(html.contains("قسم المبيعات"));
    assert!(html.contains("قسم العمليات"));
    assert!(html.contains("قسم التسويق"));
    assert!(!html.contains("item-title"));
}

#[test]
fn finance_amounts_always_have_two_decimals() {
    let html = render(json!({
        "date": "2026-08-06",
        "finance": { "entries": [
            { "title": "إيجار المكتب", "amount": 1000, "type": "expense" },
            { "title": "دفعة عميل", "amount": 250.5, "type": "income" },
            { "title": "وديعة", "amount": 99.999, "type": "deposit" }
        ] }
    }));

    assert!(html.contains("1000.00"));
    assert!(html.contains("250.50"));
    assert!(html.contains("100.00"));
}

#[test]
fn entries_keep_input_order_with_one_based_indices() {
    let html = render(json!({
        "date": "2026-08-06",
        "operations": { "entries": [
            { "task": "أولى", "status": "completed", "owner": "سارة" },
            { "task": "ثانية", "status": "in-progress", "owner": "خالد" },
            { "task": "ثالثة", "status": "pending", "owner": "ليلى" }
        ] }
    }));

    let first = html.find("1. أولى").expect("first entry missing");
    let second = html.find("2. ثانية").expect("second entry missing");
    let third = html.find("3. ثالثة").expect("third entry missing");
    assert!(first < second && second < third);
}

#[test]
fn chips_carry_localized_labels_and_colors() {
    let html = render(json!({
        "date": "2026-08-06",
        "finance": { "entries": [
            { "title": "دفعة", "amount": 10, "type": "income" }
        ] },
        "sales": { "customersContacted": 7, "entries": [
            { "customerName": "شركة النور", "outcome": "pending",
              "meetingTime": "10:30", "contactNumber": "0501234567" }
        ] },
        "marketing": { "tasks": [
            { "title": "حملة رمضان", "status": "planned" }
        ] }
    }));

    assert!(html.contains("إيراد"));
    assert!(html.contains("#4CAF50"));
    assert!(html.contains("في الانتظار"));
    assert!(html.contains("#FFC107"));
    assert!(html.contains("مخطط"));
    assert!(html.contains("عدد العملاء المتصل بهم: 7"));
    assert!(html.contains("الاجتماع: 10:30 - 0501234567"));
}

#[test]
fn sales_notes_render_only_when_non_empty() {
    let with_notes = render(json!({
        "date": "2026-08-06",
        "sales": { "entries": [
            { "customerName": "أ", "outcome": "positive", "meetingTime": "9:00",
              "contactNumber": "050", "notes": "متابعة الأسبوع القادم" }
        ] }
    }));
    assert!(with_notes.contains("ملاحظات: متابعة الأسبوع القادم"));

    let empty_notes = render(json!({
        "date": "2026-08-06",
        "sales": { "entries": [
            { "customerName": "أ", "outcome": "positive", "meetingTime": "9:00",
              "contactNumber": "050", "notes": "" }
        ] }
    }));
    assert!(!empty_notes.contains("ملاحظات"));

    let no_notes = render(json!({
        "date": "2026-08-06",
        "sales": { "entries": [
            { "customerName": "أ", "outcome": "positive", "meetingTime": "9:00",
              "contactNumber": "050" }
        ] }
    }));
    assert!(!no_notes.contains("ملاحظات"));
}

#[test]
fn unknown_outcome_is_a_section_error() {
    let err = parse_report(&json!({
        "date": "2026-08-06",
        "sales": { "entries": [
            { "customerName": "أ", "outcome": "maybe", "meetingTime": "9:00",
              "contactNumber": "050" }
        ] }
    }))
    .unwrap_err();

    assert!(matches!(
        err,
        ReportError::Section {
            section: "sales",
            ..
        }
    ));
}

#[test]
fn trips_block_absent_without_trips_object() {
    let html = render(json!({ "date": "2026-08-06" }));
    assert!(!html.contains("قسم الرحلات"));
}

#[test]
fn trips_block_absent_with_empty_entries() {
    let html = render(json!({
        "date": "2026-08-06",
        "trips": { "totalTrips": 4, "pendingSync": 1, "entries": [] }
    }));
    assert!(!html.contains("قسم الرحلات"));
}

#[test]
fn trips_block_present_with_entries_and_defaulted_totals() {
    let html = render(json!({
        "date": "2026-08-06",
        "trips": { "entries": [
            { "bookingId": "BK-100", "clientName": "فندق الريتز", "supplier": "المتحدة",
              "driverName": "سالم", "pickupPoint": "المطار", "dropoffPoint": "الفندق",
              "status": "approved" },
            { "bookingId": "BK-101", "clientName": "شركة السفر", "supplier": "النخبة",
              "driverName": "ماجد", "pickupPoint": "الفندق", "dropoffPoint": "المطار",
              "status": "draft" }
        ] }
    }));

    assert!(html.contains("قسم الرحلات"));
    assert!(html.contains("إجمالي الرحلات: 2"));
    assert!(html.contains("المزامنة المعلقة: 0"));
    assert!(html.contains("1. BK-100 - فندق الريتز"));
    assert!(html.contains("جاهز"));
    assert!(html.contains("#16a34a"));
    assert!(html.contains("تنبيه"));
    assert!(html.contains("#f59e0b"));
    assert!(html.contains("المسار: المطار → الفندق"));
}

#[test]
fn trip_fields_default_to_empty_strings() {
    let html = render(json!({
        "date": "2026-08-06",
        "trips": { "entries": [ {} ] }
    }));

    assert!(html.contains("قسم الرحلات"));
    // An entry with no status is anything-but-approved.
    assert!(html.contains("تنبيه"));
    assert!(!html.contains("جاهز"));
}

#[test]
fn missing_date_fails_at_substitution() {
    let doc = parse_report(&json!({ "finance": { "entries": [] } })).unwrap();
    let err = build_document(&doc, &stub_assets()).unwrap_err();
    assert!(matches!(
        err,
        ReportError::MissingTemplateKey(key) if key == "date"
    ));
}

#[test]
fn date_labels_default_to_date() {
    let html = render(json!({ "date": "2026-08-06" }));
    assert!(html.contains("التاريخ الميلادي: 2026-08-06"));
    assert!(html.contains("التاريخ الهجري: 2026-08-06"));

    let html = render(json!({
        "date": "2026-08-06",
        "gregorianDateLabel": "6 أغسطس 2026",
        "hijriDateLabel": "22 صفر 1448"
    }));
    assert!(html.contains("التاريخ الميلادي: 6 أغسطس 2026"));
    assert!(html.contains("التاريخ الهجري: 22 صفر 1448"));
}

#[test]
fn fonts_and_logo_flow_into_the_stylesheet() {
    let html = render(json!({ "date": "2026-08-06" }));
    assert!(html.contains("data:font/otf;base64,cmVndWxhcg=="));
    assert!(html.contains("format('opentype')"));
    assert!(html.contains("format('truetype')"));
    // Missing logo degrades to an empty src, not an error.
    assert!(html.contains(r#"src="" alt="Wathiq Logo""#));
}

#[test]
fn malformed_section_degrades_instead_of_failing() {
    let html = render(json!({
        "date": "2026-08-06",
        "finance": "completely wrong",
        "marketing": null
    }));
    assert!(html.contains("السيولة الحالية:"));
    assert!(html.contains("قسم التسويق"));
}
