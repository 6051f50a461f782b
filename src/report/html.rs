use std::collections::HashMap;
use std::fmt::Write as _;

use crate::assets::ResolvedAssets;
use crate::error::{ReportError, Result};
use crate::report::model::{
    FinanceEntry, MarketingTask, OperationsEntry, ReportDocument, SalesEntry, TripEntry,
    TripsSection,
};

/// Fixed report skeleton. Placeholders are `$key` names resolved by
/// [`substitute`]; `$$` produces a literal dollar sign.
const REPORT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
    <meta charset="UTF-8">
    <title>Daily Report - $date</title>
    <style>
        @font-face {
            font-family: 'Dubai';
            src: url("$font_regular") format('$font_regular_format');
            font-weight: normal;
            font-style: normal;
        }
        @font-face {
            font-family: 'Dubai';
            src: url("$font_bold") format('$font_bold_format');
            font-weight: bold;
            font-style: normal;
        }
        body {
            font-family: 'Dubai', sans-serif;
            margin: 50px;
            direction: rtl;
            text-align: right;
        }
        h1, h2 {
            color: #105962; /* wathiq-primary */
        }
        .header h1 {
            color: #ffffff;
        }
        .header {
            background-color: #105962; /* wathiq-primary */
            color: white;
            padding: 20px;
            text-align: center;
        }
        .logo {
            width: 140px;
            height: auto;
            display: block;
            margin: 0 auto 10px auto;
        }
        .company-name {
            font-size: 22px;
            font-weight: 700;
            margin-bottom: 6px;
        }
        .section {
            margin-top: 30px;
            border-bottom: 1px solid #D2A736; /* wathiq-accent */
            padding-bottom: 10px;
        }
        .section-title {
            font-size: 20px;
            font-weight: bold;
            color: #105962;
            background-color: #f0f8ff;
            padding: 10px;
            border-radius: 5px;
        }
        .summary {
            background-color: #F8F9FA;
            padding: 15px;
            border-radius: 5px;
            margin-top: 15px;
            font-size: 1.1em;
        }
        .item {
            margin-bottom: 12px;
            border-bottom: 1px dotted #ddd;
            padding: 6px 0 8px 0;
        }
        .item:last-child {
            border-bottom: none;
        }
        .item-header {
            display: flex;
            align-items: center;
            justify-content: space-between;
            gap: 12px;
        }
        .item-title {
            font-weight: bold;
            color: #105962;
            flex: 1;
            min-width: 0;
        }
        .item-meta {
            display: inline-flex;
            align-items: center;
            gap: 12px;
            white-space: nowrap;
        }
        .chip {
            display: inline-block;
            color: #fff;
            padding: 3px 8px;
            border-radius: 6px;
            font-size: 0.85em;
            margin-right: 20px; /* space between chip and amount in RTL renderers */
        }
        .item-amount {
            color: #D2A736; /* wathiq-accent */
            font-weight: 600;
            direction: ltr;
            text-align: left;
            font-variant-numeric: tabular-nums;
            min-width: 80px;
            display: inline-block;
            margin-inline-end: 10px;
        }
    </style>
</head>
<body>
    <div class="header">
        <img class="logo" src="$logo_src" alt="Wathiq Logo" />
        <div class="company-name">Wathiq - واثق</div>
        <h1>تقرير واثق اليومي الشامل</h1>
        <p>التاريخ الميلادي: $gregorian_date</p>
        <p>التاريخ الهجري: $hijri_date</p>
    </div>

    <div class="section">
        <div class="section-title">القسم المالي</div>
        <div class="summary">
            السيولة الحالية: $current_liquidity
        </div>
        <h3>الإدخالات المالية:</h3>
        $finance_entries
    </div>

    <div class="section">
        <div class="section-title">قسم المبيعات</div>
        <div class="summary">
            عدد العملاء المتصل بهم: $customers_contacted
        </div>
        <h3>إدخالات المبيعات:</h3>
        $sales_entries
    </div>

    <div class="section">
        <div class="section-title">قسم العمليات</div>
        <h3>إدخالات العمليات:</h3>
        $operations_entries
    </div>

    <div class="section">
        <div class="section-title">قسم التسويق</div>
        <h3>مهام التسويق:</h3>
        $marketing_tasks
    </div>

    $trips_section

</body>
</html>
"##;

/// Renders the finance entry list. The amount is always shown with exactly
/// two decimal places.
pub fn finance_entries_html(entries: &[FinanceEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let _ = write!(
            out,
            r#"
        <div class="item">
            <div class="item-header">
                <span class="item-title">{index}. {title}</span>
                <div class="item-meta">
                    <span class="item-amount">{amount:.2}</span>
                    <span class="chip" style="background-color: {color};">{label}</span>
                </div>
            </div>
        </div>
"#,
            index = i + 1,
            title = entry.title,
            amount = entry.amount,
            color = entry.kind.color(),
            label = entry.kind.label(),
        );
    }
    out
}

/// Renders the sales contact list. The notes line is emitted only when notes
/// are present and non-empty.
pub fn sales_entries_html(entries: &[SalesEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let notes_line = match entry.notes.as_deref() {
            Some(notes) if !notes.is_empty() => {
                format!("\n            <p style=\"margin: 5px 0 0;\">ملاحظات: {notes}</p>")
            }
            _ => String::new(),
        };
        let _ = write!(
            out,
            r#"
        <div class="item">
            <div class="item-header">
                <span class="item-title">{index}. {name}</span>
                <div class="item-meta">
                    <span class="chip" style="background-color: {color};">{label}</span>
                </div>
            </div>
            <p style="margin: 5px 0 0;">الاجتماع: {meeting} - {contact}</p>{notes_line}
        </div>
"#,
            index = i + 1,
            name = entry.customer_name,
            color = entry.outcome.color(),
            label = entry.outcome.label(),
            meeting = entry.meeting_time,
            contact = entry.contact_number,
        );
    }
    out
}

/// Renders the operations task list.
pub fn operations_entries_html(entries: &[OperationsEntry]) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        let _ = write!(
            out,
            r#"
        <div class="item">
            <div class="item-header">
                <span class="item-title">{index}. {task}</span>
                <div class="item-meta">
                    <span class="chip" style="background-color: {color};">{label}</span>
                </div>
            </div>
            <p style="margin: 5px 0 0;">المسؤول: {owner}</p>
            <div style="clear: both;"></div>
        </div>
"#,
            index = i + 1,
            task = entry.task,
            color = entry.status.color(),
            label = entry.status.label(),
            owner = entry.owner,
        );
    }
    out
}

/// Renders the marketing task list.
pub fn marketing_tasks_html(tasks: &[MarketingTask]) -> String {
    let mut out = String::new();
    for (i, task) in tasks.iter().enumerate() {
        let _ = write!(
            out,
            r#"
        <div class="item">
            <div class="item-header">
                <span class="item-title">{index}. {title}</span>
                <div class="item-meta">
                    <span class="chip" style="background-color: {color};">{label}</span>
                </div>
            </div>
        </div>
"#,
            index = i + 1,
            title = task.title,
            color = task.status.color(),
            label = task.status.label(),
        );
    }
    out
}

/// Renders the trip record list.
pub fn trip_entries_html(entries: &[TripEntry]) -> String {
    let mut out = String::new();
    for (i, trip) in entries.iter().enumerate() {
        let _ = write!(
            out,
            r#"
        <div class="item">
            <div class="item-header">
                <span class="item-title">{index}. {booking} - {client}</span>
                <div class="item-meta">
                    <span class="chip" style="background-color: {color};">{label}</span>
                </div>
            </div>
            <p style="margin: 4px 0 0;">المورد: {supplier} • السائق: {driver}</p>
            <p style="margin: 4px 0 0;">المسار: {pickup} → {dropoff}</p>
        </div>
"#,
            index = i + 1,
            booking = trip.booking_id,
            client = trip.client_name,
            color = trip.status_color(),
            label = trip.status_label(),
            supplier = trip.supplier,
            driver = trip.driver_name,
            pickup = trip.pickup_point,
            dropoff = trip.dropoff_point,
        );
    }
    out
}

/// Renders the whole trips block: title, totals summary, and the entry list
/// (or its "no trips recorded" placeholder when the list is empty).
pub fn trips_section_html(trips: &TripsSection) -> String {
    let entries = trip_entries_html(&trips.entries);
    let entries = if entries.is_empty() {
        "<p>لا توجد رحلات مسجلة لهذا اليوم.</p>".to_owned()
    } else {
        entries
    };
    format!(
        r#"
    <div class="section">
        <div class="section-title">قسم الرحلات</div>
        <div class="summary">
            إجمالي الرحلات: {total} • المزامنة المعلقة: {pending}
        </div>
        <h3>تفاصيل الرحلات:</h3>
        {entries}
    </div>
"#,
        total = trips.total_trips.unwrap_or(trips.entries.len() as u64),
        pending = trips.pending_sync.unwrap_or(0),
    )
}

/// Replaces every `$key` in `template` with its value. A key without a value
/// is an error; a `$` not followed by an identifier is literal and `$$`
/// escapes to a single `$`.
pub fn substitute(template: &str, values: &HashMap<&str, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(stripped) = after.strip_prefix('$') {
            out.push('$');
            rest = stripped;
            continue;
        }

        let key_len = after
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if key_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }

        let key = &after[..key_len];
        let value = values
            .get(key)
            .ok_or_else(|| ReportError::MissingTemplateKey(key.to_owned()))?;
        out.push_str(value);
        rest = &after[key_len..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Assembles the complete HTML document for a normalized report.
///
/// The trips block is included only when the payload carried a trips object
/// with at least one entry. A missing `date` surfaces here as a
/// [`ReportError::MissingTemplateKey`].
pub fn build_document(doc: &ReportDocument, assets: &ResolvedAssets) -> Result<String> {
    let mut values: HashMap<&str, String> = HashMap::new();

    if let Some(date) = &doc.date {
        values.insert("date", date.clone());
        values.insert(
            "gregorian_date",
            doc.gregorian_date_label.clone().unwrap_or_else(|| date.clone()),
        );
        values.insert(
            "hijri_date",
            doc.hijri_date_label.clone().unwrap_or_else(|| date.clone()),
        );
    }

    values.insert("font_regular", assets.font_regular.data_uri.clone());
    values.insert(
        "font_regular_format",
        assets.font_regular.css_format.to_owned(),
    );
    values.insert("font_bold", assets.font_bold.data_uri.clone());
    values.insert("font_bold_format", assets.font_bold.css_format.to_owned());
    values.insert("logo_src", assets.logo_src.clone());

    values.insert(
        "current_liquidity",
        doc.finance
            .current_liquidity
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    );
    values.insert(
        "customers_contacted",
        doc.sales.customers_contacted.to_string(),
    );

    values.insert("finance_entries", finance_entries_html(&doc.finance.entries));
    values.insert("sales_entries", sales_entries_html(&doc.sales.entries));
    values.insert(
        "operations_entries",
        operations_entries_html(&doc.operations.entries),
    );
    values.insert("marketing_tasks", marketing_tasks_html(&doc.marketing.tasks));

    let trips_block = match &doc.trips {
        Some(trips) if !trips.entries.is_empty() => trips_section_html(trips),
        _ => String::new(),
    };
    values.insert("trips_section", trips_block);

    substitute(REPORT_TEMPLATE, &values)
}
