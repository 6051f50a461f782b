mod html;
mod model;

pub use html::{build_document, substitute, trips_section_html};
pub use model::{
    CampaignStatus, EntryKind, FinanceEntry, FinanceSection, MarketingSection, MarketingTask,
    OperationsEntry, OperationsSection, Outcome, ReportDocument, SalesEntry, SalesSection, Scalar,
    TaskStatus, TripEntry, TripsSection, parse_report,
};
