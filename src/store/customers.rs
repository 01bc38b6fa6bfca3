//! Customer lookups.

use super::{search_query, MixinStore};
use crate::rest::resources::Customer;
use crate::rest::{PageCursor, ResourceError, RestResource};

impl MixinStore {
    /// Fetches one customer.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the customer does not exist.
    pub async fn customer(&self, id: i64) -> Result<Customer, ResourceError> {
        Customer::find(&self.client, id).await
    }

    /// Searches customers through the vendor, reading from `cursor` on.
    ///
    /// A `None` term matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] only if the customer
    /// resource has no list path.
    pub async fn search_customers(
        &self,
        term: Option<&str>,
        cursor: PageCursor,
    ) -> Result<Vec<Customer>, ResourceError> {
        let Some(term) = term else {
            return Ok(Vec::new());
        };

        Ok(Customer::all(&self.client, Some(search_query(term)), Some(cursor))
            .await?
            .into_records())
    }

    /// Searches customers and returns `(id, "First Last")` pairs.
    ///
    /// Customers without an id are left out.
    ///
    /// # Errors
    ///
    /// See [`search_customers`](Self::search_customers).
    pub async fn customer_names_by_search(
        &self,
        term: Option<&str>,
        cursor: PageCursor,
    ) -> Result<Vec<(i64, String)>, ResourceError> {
        Ok(self
            .search_customers(term, cursor)
            .await?
            .iter()
            .filter_map(|customer| Some((customer.id?, customer.full_name())))
            .collect())
    }
}
