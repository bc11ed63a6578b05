use sea_orm::{
    sea_query::{BinOper, Expr, Func},
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::entity::stations;

pub const DEFAULT_PAGE_SIZE: u64 = 200;
pub const MAX_PAGE_SIZE: u64 = 1000;
/// Largest page number honoured; keeps the row offset within a signed 64-bit bound.
pub const MAX_PAGE: u64 = 9_007_199_254_740_991;

/// Columns the keyword search looks at.
const SEARCH_COLUMNS: [stations::Column; 6] = [
    stations::Column::StationId,
    stations::Column::StationName,
    stations::Column::StationName2,
    stations::Column::StationName3,
    stations::Column::RiverName,
    stations::Column::BasinName,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationFilter {
    /// Case-insensitive substring; blank means no keyword filter
    pub keyword: Option<String>,
    /// Restrict to `has_data = 0` or `has_data = 1`
    pub has_data: Option<i32>,
    /// 1-based
    pub page: u64,
    pub page_size: u64,
}

impl Default for StationFilter {
    fn default() -> Self {
        Self {
            keyword: None,
            has_data: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl StationFilter {
    fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(keyword) = self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            // Fold both sides with the store's LOWER()
            let pattern = format!("%{keyword}%");
            let any_column = SEARCH_COLUMNS.iter().fold(Condition::any(), |any, column| {
                any.add(
                    Expr::expr(Func::lower(Expr::col((stations::Entity, *column)))).binary(
                        BinOper::Like,
                        Func::lower(Expr::val(pattern.as_str())),
                    ),
                )
            });
            condition = condition.add(any_column);
        }

        if let Some(flag) = self.has_data {
            condition = condition.add(stations::Column::HasData.eq(flag));
        }

        condition
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationPage {
    pub items: Vec<stations::Model>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
}

/// Read-only access to `stations`.
#[derive(Clone)]
pub struct StationRepository {
    db: DatabaseConnection,
}

impl StationRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stations matching the filter; those with data first, then by id.
    ///
    /// A page past the end yields no items rather than an error.
    pub async fn list(&self, filter: &StationFilter) -> Result<StationPage, DbErr> {
        let page = filter.page.clamp(1, MAX_PAGE);
        let page_size = filter.page_size.clamp(1, MAX_PAGE_SIZE);

        let query = stations::Entity::find().filter(filter.condition());

        let total = query.clone().count(&self.db).await?;

        let items = query
            .order_by_desc(stations::Column::HasData)
            .order_by_asc(stations::Column::StationId)
            .limit(page_size)
            .offset((page - 1).saturating_mul(page_size))
            .all(&self.db)
            .await?;

        tracing::debug!(
            keyword = ?filter.keyword,
            has_data = ?filter.has_data,
            page,
            page_size,
            total,
            items = items.len(),
            "station_list"
        );

        Ok(StationPage {
            items,
            page,
            page_size,
            total,
            total_pages: total_pages(total, page_size),
        })
    }
}

fn total_pages(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 200), 0);
        assert_eq!(total_pages(1, 200), 1);
        assert_eq!(total_pages(200, 200), 1);
        assert_eq!(total_pages(201, 200), 2);
        assert_eq!(total_pages(2_345, 1000), 3);
    }

    #[test]
    fn blank_keyword_adds_no_condition() {
        let filter = StationFilter {
            keyword: Some("   ".to_string()),
            ..StationFilter::default()
        };
        assert!(filter.condition().is_empty());
    }

    #[test]
    fn keyword_and_flag_combine() {
        let filter = StationFilter {
            keyword: Some("kiso".to_string()),
            has_data: Some(1),
            ..StationFilter::default()
        };
        assert_eq!(filter.condition().len(), 2);
    }
}
