//! Order listing and assembly.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::MixinStore;
use crate::rest::resources::{OrderDetail, OrderListParams, OrderStatus, OrderSummary};
use crate::rest::{
    serialize_to_query, AssembledOrder, CatalogVariantResolver, OrderAssembler, PageCursor,
    ResourceError, RestResource,
};

/// Selection criteria for [`MixinStore::orders_by_filters`].
///
/// Date bounds are inclusive calendar days; a `None` bound is open.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use mixin_api::store::OrderFilter;
/// use mixin_api::rest::resources::OrderStatus;
///
/// let filter = OrderFilter {
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
///     statuses: vec![OrderStatus::Completed],
///     ..OrderFilter::default()
/// };
/// assert!(!filter.matches_any_status());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Orders the host already knows about.
    pub excluded_ids: Vec<i64>,
    /// Wanted statuses. Empty selects nothing; [`OrderStatus::Other`] selects everything.
    pub statuses: Vec<OrderStatus>,
}

impl OrderFilter {
    /// Returns `true` if the status set places no restriction on the vendor status.
    #[must_use]
    pub fn matches_any_status(&self) -> bool {
        self.statuses.contains(&OrderStatus::Other)
    }

    /// Builds the vendor query for this filter.
    fn list_params(&self) -> OrderListParams {
        let status = if self.matches_any_status() {
            Vec::new()
        } else {
            self.statuses.iter().map(|status| status.as_vendor()).collect()
        };

        OrderListParams {
            start_date: self.start_date,
            end_date: self.end_date,
            status,
        }
    }

    /// Re-checks a listed order against every criterion.
    fn admits(&self, summary: &OrderSummary) -> bool {
        let day = summary.creation_date.date_naive();

        !self.excluded_ids.contains(&summary.id)
            && self.start_date.map_or(true, |start| day >= start)
            && self.end_date.map_or(true, |end| day <= end)
            && (self.matches_any_status() || self.statuses.contains(&summary.order_status()))
    }
}

impl MixinStore {
    /// Lists order summaries created in the date range, minus the given ids.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Serialization`] if the query cannot be built.
    pub async fn orders_excluding(
        &self,
        excluded: &[i64],
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<OrderSummary>, ResourceError> {
        let excluded: HashSet<i64> = excluded.iter().copied().collect();
        let query = serialize_to_query(&OrderListParams {
            start_date,
            end_date,
            status: Vec::new(),
        })?;

        Ok(OrderSummary::all(&self.client, Some(query), None)
            .await?
            .into_records()
            .into_iter()
            .filter(|summary| !excluded.contains(&summary.id))
            .collect())
    }

    /// Lists and assembles the orders that pass `filter`.
    ///
    /// The vendor pre-filters by status and date; every summary is checked
    /// again locally before its detail is fetched.
    ///
    /// # Errors
    ///
    /// Returns the first error of any detail fetch or assembly.
    pub async fn orders_by_filters(
        &self,
        filter: &OrderFilter,
    ) -> Result<Vec<AssembledOrder>, ResourceError> {
        if filter.statuses.is_empty() {
            return Ok(Vec::new());
        }

        let query = serialize_to_query(&filter.list_params())?;
        let summaries = OrderSummary::all(&self.client, Some(query), None)
            .await?
            .into_records();

        let assembler = self.assembler();
        let mut orders = Vec::new();
        for summary in summaries.iter().filter(|summary| filter.admits(summary)) {
            orders.push(self.assemble_order(&assembler, summary.id).await?);
        }

        tracing::debug!(
            listed = summaries.len(),
            assembled = orders.len(),
            "Collected filtered orders"
        );
        Ok(orders)
    }

    /// Assembles one page of orders, minus the given ids.
    ///
    /// Statuses are applied after assembly; an empty set or one containing
    /// [`OrderStatus::Other`] keeps every order.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the page is rejected, or the
    /// first error of any detail fetch or assembly.
    pub async fn orders_by_search(
        &self,
        excluded: &[i64],
        statuses: &[OrderStatus],
        cursor: PageCursor,
    ) -> Result<Vec<AssembledOrder>, ResourceError> {
        let excluded: HashSet<i64> = excluded.iter().copied().collect();
        let page = OrderSummary::first_page(&self.client, None, Some(cursor)).await?;

        let assembler = self.assembler();
        let mut orders = Vec::new();
        for summary in page.result.iter().filter(|summary| !excluded.contains(&summary.id)) {
            orders.push(self.assemble_order(&assembler, summary.id).await?);
        }

        if !statuses.is_empty() && !statuses.contains(&OrderStatus::Other) {
            orders.retain(|order| statuses.contains(&order.status()));
        }
        Ok(orders)
    }

    /// Fetches one order and tags its lines with composite ids.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the order does not exist, or
    /// [`ResourceError::InvalidArgument`] if a line's product URL is malformed.
    pub async fn order(&self, id: i64) -> Result<AssembledOrder, ResourceError> {
        self.assemble_order(&self.assembler(), id).await
    }

    /// Always fails: the vendor API cannot change an order's status.
    ///
    /// # Errors
    ///
    /// Always returns [`ResourceError::Unsupported`].
    #[allow(clippy::unused_self)]
    pub fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<(), ResourceError> {
        tracing::debug!(order_id, %status, "Rejected order status update");
        Err(ResourceError::Unsupported {
            operation: "Order status update",
        })
    }

    fn assembler(&self) -> OrderAssembler<CatalogVariantResolver<'_>> {
        OrderAssembler::new(CatalogVariantResolver::new(&self.client))
    }

    async fn assemble_order(
        &self,
        assembler: &OrderAssembler<CatalogVariantResolver<'_>>,
        id: i64,
    ) -> Result<AssembledOrder, ResourceError> {
        let detail = OrderDetail::find(&self.client, id).await?;
        assembler.assemble(detail).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn summary(id: i64, status: &str, day: u32) -> OrderSummary {
        OrderSummary {
            id,
            first_name: None,
            last_name: None,
            phone_number: None,
            status: status.to_string(),
            payment_method: None,
            payment_status: None,
            creation_date: Utc.with_ymd_and_hms(2024, 3, day, 18, 30, 0).unwrap(),
            shipping_method_name: None,
            final_price: None,
        }
    }

    fn day(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, day)
    }

    #[test]
    fn test_filter_date_bounds_are_inclusive_days() {
        let filter = OrderFilter {
            start_date: day(5),
            end_date: day(7),
            statuses: vec![OrderStatus::Other],
            ..OrderFilter::default()
        };

        assert!(!filter.admits(&summary(1, "finished", 4)));
        assert!(filter.admits(&summary(2, "finished", 5)));
        assert!(filter.admits(&summary(3, "finished", 7)));
        assert!(!filter.admits(&summary(4, "finished", 8)));
    }

    #[test]
    fn test_filter_open_bounds() {
        let filter = OrderFilter {
            statuses: vec![OrderStatus::Other],
            ..OrderFilter::default()
        };
        assert!(filter.admits(&summary(1, "draft", 1)));
        assert!(filter.admits(&summary(2, "draft", 31)));
    }

    #[test]
    fn test_filter_checks_status_and_exclusions() {
        let filter = OrderFilter {
            excluded_ids: vec![2],
            statuses: vec![OrderStatus::Completed],
            ..OrderFilter::default()
        };

        assert!(filter.admits(&summary(1, "FINISHED", 3)));
        assert!(!filter.admits(&summary(2, "finished", 3)));
        assert!(!filter.admits(&summary(3, "shipping", 3)));
    }

    #[test]
    fn test_list_params_drop_status_when_any_is_wanted() {
        let filter = OrderFilter {
            start_date: day(1),
            statuses: vec![OrderStatus::Completed, OrderStatus::Other],
            ..OrderFilter::default()
        };
        let query = serialize_to_query(&filter.list_params()).unwrap();

        assert_eq!(query.get("start_date").map(String::as_str), Some("2024-03-01"));
        assert!(!query.contains_key("status"));
        assert!(!query.contains_key("end_date"));
    }

    #[test]
    fn test_list_params_join_vendor_statuses() {
        let filter = OrderFilter {
            statuses: vec![OrderStatus::Completed, OrderStatus::Cancelled],
            ..OrderFilter::default()
        };
        let query = serialize_to_query(&filter.list_params()).unwrap();

        assert_eq!(query.get("status").map(String::as_str), Some("finished,canceled"));
    }
}
