//! Product, variant and category operations.

use std::collections::HashSet;

use super::{product_id, search_query, vendor_id, MixinStore};
use crate::rest::resources::{Category, Product, ProductKind, Variant};
use crate::rest::{
    CompositeId, Encoded, FieldCategory, FieldMask, PageCursor, ResourceError, RestResource,
    MAX_PAGE_SIZE,
};

/// Fields a product update never overwrites.
const PRODUCT_UPDATE_GUARDS: [FieldCategory; 2] =
    [FieldCategory::ProductAttributes, FieldCategory::DraftStatus];

/// Fields a variant update never overwrites.
const VARIANT_UPDATE_GUARDS: [FieldCategory; 3] = [
    FieldCategory::ProductName,
    FieldCategory::ProductAttributes,
    FieldCategory::DraftStatus,
];

impl MixinStore {
    /// Creates a product and returns its composite id.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the create is rejected, or
    /// [`ResourceError::UnexpectedBody`] if the response carries no id.
    pub async fn create_product(
        &self,
        product: &Product,
        exclude: &FieldMask,
    ) -> Result<CompositeId, ResourceError> {
        let created = product.create(&self.client, exclude).await?;
        let id = product_id(vendor_id(&created)?)?;

        tracing::debug!(product_id = %id, "Created product");
        Ok(id)
    }

    /// Overwrites the product behind `id`, leaving the masked fields untouched.
    ///
    /// Attributes and the draft flag are never sent. If `exclude` contains
    /// [`FieldCategory::ProductDiscount`], the discount is cleared instead of
    /// kept: the price is reset to the compare-at price.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the update is rejected.
    pub async fn update_product(
        &self,
        id: CompositeId,
        product: &Product,
        exclude: &FieldMask,
    ) -> Result<CompositeId, ResourceError> {
        let outer = id.outer();

        let mut mask = exclude.clone();
        mask.extend(PRODUCT_UPDATE_GUARDS);

        let mut product = product.clone();
        product.id = Some(outer);
        clear_discount(&mut mask, &mut product.price, product.compare_at_price);

        let saved = product.update(&self.client, &[("id", outer)], &mask).await?;
        product_id(saved.id.unwrap_or(outer))
    }

    /// Fetches one product, returned under the caller's id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the product does not exist.
    pub async fn product(&self, id: CompositeId) -> Result<Encoded<Product>, ResourceError> {
        let product = Product::find(&self.client, id.outer()).await?;
        Ok(Encoded::new(id, product))
    }

    /// Fetches every product.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedBody`] if a listed product has no id.
    pub async fn products(&self) -> Result<Vec<Encoded<Product>>, ResourceError> {
        Product::all(&self.client, None, None)
            .await?
            .into_records()
            .into_iter()
            .map(encode_product)
            .collect()
    }

    /// Counts the products matching an optional vendor-side search.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] only if the product
    /// resource has no list path.
    pub async fn total_products_count(&self, search: Option<&str>) -> Result<usize, ResourceError> {
        let collected = Product::all(
            &self.client,
            search.map(search_query),
            Some(PageCursor::first(MAX_PAGE_SIZE)),
        )
        .await?;
        Ok(collected.records.len())
    }

    /// Lists the first page of products, minus the given ids.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the page is rejected.
    pub async fn products_excluding(
        &self,
        excluded: &[CompositeId],
    ) -> Result<Vec<Encoded<Product>>, ResourceError> {
        let excluded: HashSet<CompositeId> = excluded.iter().copied().collect();
        let page = Product::first_page(&self.client, None, None).await?;

        let products: Vec<Encoded<Product>> = page
            .result
            .into_iter()
            .map(encode_product)
            .collect::<Result<_, _>>()?;

        Ok(products
            .into_iter()
            .filter(|product| !excluded.contains(&product.id()))
            .collect())
    }

    /// Finds products of `kind` whose name contains `term`, reading from `cursor` on.
    ///
    /// Matching happens locally; a `None` term matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedBody`] if a matched product has no id.
    pub async fn search_products(
        &self,
        term: Option<&str>,
        kind: ProductKind,
        cursor: PageCursor,
    ) -> Result<Vec<Encoded<Product>>, ResourceError> {
        let Some(term) = term else {
            return Ok(Vec::new());
        };

        Product::all(&self.client, None, Some(cursor))
            .await?
            .into_records()
            .into_iter()
            .filter(|product| kind.matches(product) && product.name_contains(term))
            .map(encode_product)
            .collect()
    }

    /// Fetches every product of `kind` in full detail.
    ///
    /// List entries are abbreviated, so each match is fetched again.
    ///
    /// # Errors
    ///
    /// Returns the first error of any detail fetch.
    pub async fn products_by_kind(
        &self,
        kind: ProductKind,
    ) -> Result<Vec<Encoded<Product>>, ResourceError> {
        let listed = Product::all(&self.client, None, None).await?.into_records();

        let mut detailed = Vec::new();
        for product in listed.iter().filter(|product| kind.matches(product)) {
            let id = product_id(vendor_id(product)?)?;
            detailed.push(self.product(id).await?);
        }

        tracing::debug!(?kind, count = detailed.len(), "Fetched products in detail");
        Ok(detailed)
    }

    /// Searches the vendor for variable products whose name contains `term`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedBody`] if a matched product has no id.
    pub async fn variable_products_by_search(
        &self,
        term: &str,
    ) -> Result<Vec<Encoded<Product>>, ResourceError> {
        Product::all(&self.client, Some(search_query(term)), None)
            .await?
            .into_records()
            .into_iter()
            .filter(|product| ProductKind::Variable.matches(product) && product.name_contains(term))
            .map(encode_product)
            .collect()
    }

    /// Returns the largest product id on the first page, `None` if it is empty.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the page is rejected.
    pub async fn max_product_id(&self) -> Result<Option<CompositeId>, ResourceError> {
        let page = Product::first_page(&self.client, None, None).await?;
        page.result
            .iter()
            .filter_map(|product| product.id)
            .max()
            .map(product_id)
            .transpose()
    }

    /// Fetches every variant of a product under `encode(product, variant)`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedBody`] if a variant has no id.
    pub async fn variations(
        &self,
        product: CompositeId,
    ) -> Result<Vec<Encoded<Variant>>, ResourceError> {
        let outer = product.outer();

        Variant::all_with_parent(&self.client, "product_id", outer, None)
            .await?
            .into_records()
            .into_iter()
            .map(|variant| {
                let id = CompositeId::encode(outer, vendor_id(&variant)?)?;
                Ok(Encoded::new(id, variant))
            })
            .collect()
    }

    /// Overwrites the variant behind `variation`, leaving the masked fields untouched.
    ///
    /// The name, attributes and draft flag are never sent. Discounts are
    /// handled as in [`update_product`](Self::update_product).
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the update is rejected.
    pub async fn update_variation(
        &self,
        variation: CompositeId,
        variant: &Variant,
        exclude: &FieldMask,
    ) -> Result<CompositeId, ResourceError> {
        let (outer, inner) = variation.decode();

        let mut mask = exclude.clone();
        mask.extend(VARIANT_UPDATE_GUARDS);

        let mut variant = variant.clone();
        variant.id = Some(inner);
        clear_discount(&mut mask, &mut variant.price, variant.compare_at_price);

        let saved = variant
            .update(&self.client, &[("product_id", outer), ("id", inner)], &mask)
            .await?;
        Ok(CompositeId::encode(outer, saved.id.unwrap_or(inner))?)
    }

    /// Fetches one category.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the category does not exist.
    pub async fn category(&self, id: i64) -> Result<Category, ResourceError> {
        Category::find(&self.client, id).await
    }

    /// Fetches every category.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] only if the category
    /// resource has no list path.
    pub async fn categories(&self) -> Result<Vec<Category>, ResourceError> {
        Ok(Category::all(&self.client, None, None).await?.into_records())
    }

    /// Creates a category and returns its vendor id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::VendorRejected`] with
    /// [`RejectionReason::DuplicateName`](crate::rest::RejectionReason::DuplicateName)
    /// or [`RejectionReason::MissingParent`](crate::rest::RejectionReason::MissingParent)
    /// for the vendor's usual refusals.
    pub async fn create_category(
        &self,
        category: &Category,
        exclude: &FieldMask,
    ) -> Result<i64, ResourceError> {
        let created = category.create(&self.client, exclude).await?;
        let id = vendor_id(&created)?;

        tracing::debug!(category_id = id, "Created category");
        Ok(id)
    }

    /// Overwrites a category. The parent link is never sent.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the update is rejected.
    pub async fn update_category(
        &self,
        id: i64,
        category: &Category,
        exclude: &FieldMask,
    ) -> Result<i64, ResourceError> {
        let mut mask = exclude.clone();
        mask.insert(FieldCategory::Sku);

        let saved = category.update(&self.client, &[("id", id)], &mask).await?;
        Ok(saved.id.unwrap_or(id))
    }

    /// Searches categories by name, reading from `cursor` on.
    ///
    /// A `None` term matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] only if the category
    /// resource has no list path.
    pub async fn search_categories(
        &self,
        term: Option<&str>,
        cursor: PageCursor,
    ) -> Result<Vec<Category>, ResourceError> {
        let Some(term) = term else {
            return Ok(Vec::new());
        };

        Ok(Category::all(&self.client, Some(search_query(term)), Some(cursor))
            .await?
            .into_records())
    }

    /// Returns the largest category id on the first page, `None` if it is empty.
    ///
    /// # Errors
    ///
    /// Returns the classified vendor error if the page is rejected.
    pub async fn max_category_id(&self) -> Result<Option<i64>, ResourceError> {
        let page = Category::first_page(&self.client, None, None).await?;
        Ok(page.result.iter().filter_map(|category| category.id).max())
    }
}

/// Tags a listed product with its bare composite id.
fn encode_product(product: Product) -> Result<Encoded<Product>, ResourceError> {
    let id = product_id(vendor_id(&product)?)?;
    Ok(Encoded::new(id, product))
}

/// Resets `price` to the compare-at price when the mask asks to drop the discount.
///
/// The discount category is consumed so the reset price is actually sent.
fn clear_discount(mask: &mut FieldMask, price: &mut Option<i64>, compare_at_price: Option<i64>) {
    if mask.remove(FieldCategory::ProductDiscount) {
        *price = compare_at_price;
    }
}
