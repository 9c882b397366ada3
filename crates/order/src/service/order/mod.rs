mod command;
mod line_items;
mod policy;
mod query;

pub use self::command::{OrderCommandService, OrderCommandServiceDeps};
pub use self::line_items::{PricedLineItem, aggregate_line_items, total_price};
pub use self::policy::MissingProductPolicy;
pub use self::query::OrderQueryService;
