use serde::Serialize;

use crate::engine::filter::{Predicate, ScopePredicate, StaticPredicate};
use crate::engine::indicator::{
    AggregateQuery, ClassificationRule, Dimension, GroupingPeriod, RecordSource,
};
use crate::engine::types::{CellValue, ColumnRef};

/// SQL text plus its positional parameters (`$1` is `params[0]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<CellValue>,
}

/// Renders an `AggregateQuery` as PostgreSQL.
///
/// Every value reaches the database as a bound parameter; only identifiers taken
/// from indicator definitions appear in the SQL text, always double-quoted.
pub struct SqlRenderer {
    params: Vec<CellValue>,
}

impl SqlRenderer {
    pub fn render(query: &AggregateQuery) -> RenderedQuery {
        let mut renderer = SqlRenderer { params: Vec::new() };
        let sql = renderer.aggregate(query);
        RenderedQuery {
            sql,
            params: renderer.params,
        }
    }

    fn aggregate(&mut self, query: &AggregateQuery) -> String {
        let mut select = vec![format!(
            "{} AS lookup_value",
            self.dimension(&query.dimension, query)
        )];
        let mut keys: Vec<&str> = Vec::new();
        if let Some(grouping) = &query.grouping {
            let column = Self::ident(&grouping.column);
            select.push(format!(
                "CAST(EXTRACT(YEAR FROM {column}) AS INTEGER) AS group_year"
            ));
            keys.push("group_year");
            let part = match grouping.period {
                GroupingPeriod::Year => None,
                GroupingPeriod::Quarter => Some("QUARTER"),
                GroupingPeriod::Month => Some("MONTH"),
            };
            if let Some(field) = part {
                select.push(format!(
                    "CAST(EXTRACT({field} FROM {column}) AS INTEGER) AS group_part"
                ));
                keys.push("group_part");
            }
        }
        keys.push("lookup_value");

        let mut inner = format!(
            "SELECT {} FROM {}",
            select.join(", "),
            Self::source(&query.source)
        );
        if let Some(predicate) = &query.predicate {
            inner.push_str(" WHERE ");
            inner.push_str(&self.predicate(predicate, true));
        }

        let keys = keys.join(", ");
        format!(
            "SELECT {keys}, COUNT(*) AS total FROM ({inner}) AS indicator_rows GROUP BY {keys} ORDER BY {keys}"
        )
    }

    fn bind(&mut self, value: CellValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    fn quote(identifier: &str) -> String {
        format!("\"{}\"", identifier.replace('"', "\"\""))
    }

    fn ident(column: &ColumnRef) -> String {
        format!("{}.{}", Self::quote(&column.alias), Self::quote(&column.column))
    }

    fn source(source: &RecordSource) -> String {
        let mut sql = format!("{} AS {}", Self::quote(&source.table), Self::quote(&source.alias));
        for join in &source.joins {
            sql.push_str(&format!(
                " INNER JOIN {} AS {} ON {} = {}",
                Self::quote(&join.table),
                Self::quote(&join.alias),
                Self::ident(&ColumnRef::new(join.alias.as_str(), join.column.as_str())),
                Self::ident(&join.left),
            ));
        }
        sql
    }

    fn dimension(&mut self, dimension: &Dimension, query: &AggregateQuery) -> String {
        match dimension {
            Dimension::Column(column) => {
                let fallback = self.bind(CellValue::text(query.incomplete_data_key.as_str()));
                let text = format!("CAST({} AS TEXT)", Self::ident(column));
                // Blank text falls back like NULL does.
                format!("CASE WHEN BTRIM({text}) <> '' THEN {text} ELSE {fallback} END")
            }
            Dimension::Classification(classification) => {
                let mut sql = String::from("CASE");
                for case in &classification.cases {
                    match &case.rule {
                        ClassificationRule::DateOnOrBefore(column) => {
                            let as_of = self.bind(CellValue::Date(query.as_of));
                            let label = self.bind(CellValue::text(case.label.as_str()));
                            let column = Self::ident(column);
                            sql.push_str(&format!(
                                " WHEN {column} IS NOT NULL AND {column} <= {as_of} THEN {label}"
                            ));
                        }
                    }
                }
                let otherwise = self.bind(CellValue::text(classification.otherwise.as_str()));
                sql.push_str(&format!(" ELSE {otherwise} END"));
                sql
            }
            Dimension::AgeRange { column, ranges } => {
                let column = Self::ident(column);
                let mut sql = String::from("CASE");
                for range in ranges {
                    let min = self.bind(CellValue::Int64(range.min as i64));
                    let condition = match range.max {
                        Some(max) => {
                            let max = self.bind(CellValue::Int64(max as i64));
                            format!("{column} BETWEEN {min} AND {max}")
                        }
                        None => format!("{column} >= {min}"),
                    };
                    let label = self.bind(CellValue::text(range.to_string()));
                    sql.push_str(&format!(" WHEN {condition} THEN {label}"));
                }
                let otherwise = self.bind(CellValue::text(query.incomplete_data_key.as_str()));
                sql.push_str(&format!(" ELSE {otherwise} END"));
                sql
            }
        }
    }

    fn predicate(&mut self, predicate: &Predicate, top_level: bool) -> String {
        match predicate {
            Predicate::DateRange { column, from, to } => {
                let column = Self::ident(column);
                let mut parts = Vec::new();
                if let Some(from) = from {
                    parts.push(format!("{column} >= {}", self.bind(CellValue::Date(*from))));
                }
                if let Some(to) = to {
                    parts.push(format!("{column} <= {}", self.bind(CellValue::Date(*to))));
                }
                match parts.len() {
                    0 => "TRUE".to_string(),
                    1 => parts.remove(0),
                    _ => format!("({})", parts.join(" AND ")),
                }
            }
            Predicate::Equality { column, value } => {
                format!("{} = {}", Self::ident(column), self.bind(value.clone()))
            }
            Predicate::Scope(ScopePredicate::Membership { column, values }) => format!(
                "{} = ANY({})",
                Self::ident(column),
                self.bind(CellValue::List(values.clone()))
            ),
            Predicate::Scope(ScopePredicate::Overlap { column, values }) => format!(
                "{} && {}",
                Self::ident(column),
                self.bind(CellValue::List(values.clone()))
            ),
            Predicate::Scope(ScopePredicate::DenyAll) => "FALSE".to_string(),
            Predicate::Static(StaticPredicate::Present(column)) => {
                format!("{} IS NOT NULL", Self::ident(column))
            }
            Predicate::Static(StaticPredicate::IsTrue(column)) => {
                format!("{} IS TRUE", Self::ident(column))
            }
            Predicate::Static(StaticPredicate::Equals(column, value)) => {
                format!("{} = {}", Self::ident(column), self.bind(value.clone()))
            }
            Predicate::And(parts) => {
                let rendered: Vec<String> =
                    parts.iter().map(|p| self.predicate(p, false)).collect();
                if top_level {
                    rendered.join(" AND ")
                } else {
                    format!("({})", rendered.join(" AND "))
                }
            }
        }
    }
}
