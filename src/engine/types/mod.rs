mod cell_value;
mod column_ref;
mod group_id;
mod result_row;

pub use cell_value::CellValue;
pub use column_ref::ColumnRef;
pub use group_id::{GroupId, PeriodPart};
pub use result_row::ResultRow;
