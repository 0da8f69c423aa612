pub mod chart;
pub mod grouped_table;
pub mod ordering;
pub mod table_builder;

pub use chart::{ChartData, ChartDataset};
pub use grouped_table::{GroupedTable, HeaderCell, TableColumn, TableRow};
pub use ordering::RowOrder;
pub use table_builder::TableBuilder;
