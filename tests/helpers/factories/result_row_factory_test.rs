use crate::engine::types::{GroupId, ResultRow};
use crate::test_helpers::factories::ResultRowFactory;

#[test]
fn builds_rows_in_call_order() {
    let rows = ResultRowFactory::new()
        .add("killing", 2)
        .add_year(2021, "maiming", 1)
        .add_quarter(2021, 3, "maiming", 4)
        .create();

    assert_eq!(
        rows,
        vec![
            ResultRow::new("killing", 2),
            ResultRow::grouped(GroupId::year(2021), "maiming", 1),
            ResultRow::grouped(GroupId::quarter(2021, 3), "maiming", 4),
        ]
    );
}
