//! crates/inventory_core/src/store.rs
//!
//! The Product Store: the authoritative in-memory product list for the session,
//! mirrored to the key/value store after every mutation.
//!
//! Every mutation builds the candidate list first, writes it, and only then
//! replaces the in-memory list. A failed write therefore leaves memory equal to
//! the last persisted state and surfaces as `PortError::Storage`.

use crate::domain::{NewProduct, Product, ProductId, ProductPatch};
use crate::ports::{KeyValueStore, PortError, PortResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key under which the serialized product list is stored.
pub const PRODUCTS_KEY: &str = "inventory_products";

pub struct ProductStore {
    kv: Arc<dyn KeyValueStore>,
    products: Vec<Product>,
    next_id: ProductId,
}

impl ProductStore {
    /// Seeds the store from the persisted list.
    ///
    /// Missing, unreadable or unparsable data yields an empty store; start-up
    /// never fails because of what is on disk.
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let products = match kv.get(PRODUCTS_KEY) {
            Ok(Some(raw)) => match decode_products(&raw) {
                Ok(records) => sanitize(records),
                Err(e) => {
                    warn!("Ignoring stored products: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read stored products, starting empty: {}", e);
                Vec::new()
            }
        };
        info!("Loaded {} products", products.len());

        let next_id = next_id_after(&products).unwrap_or(ProductId::MAX);
        Self {
            kv,
            products,
            next_id,
        }
    }

    /// Assigns a fresh id to the payload, appends it and persists.
    ///
    /// `ProductId::MAX` is never handed out; once the high-water mark reaches
    /// it, creation fails with `PortError::IdsExhausted`.
    pub fn create(&mut self, payload: NewProduct) -> PortResult<Product> {
        let id = self.next_id;
        if id == ProductId::MAX {
            return Err(PortError::IdsExhausted);
        }
        let product = payload.into_product(id);

        let mut candidate = self.products.clone();
        candidate.push(product.clone());
        self.commit(candidate)?;

        self.next_id = id + 1;
        debug!("Created product {}", id);
        Ok(product)
    }

    /// Merges `patch` into the product with `id`.
    ///
    /// Returns `Ok(None)` without writing anything when no such product exists.
    pub fn update(&mut self, id: ProductId, patch: ProductPatch) -> PortResult<Option<Product>> {
        let Some(index) = self.position(id) else {
            debug!("Update of unknown product {} ignored", id);
            return Ok(None);
        };

        let mut candidate = self.products.clone();
        patch.apply_to(&mut candidate[index]);
        let updated = candidate[index].clone();
        self.commit(candidate)?;

        debug!("Updated product {}", id);
        Ok(Some(updated))
    }

    /// Removes the product with `id`. Returns `Ok(false)` and writes nothing when
    /// it does not exist.
    pub fn remove(&mut self, id: ProductId) -> PortResult<bool> {
        if self.position(id).is_none() {
            debug!("Removal of unknown product {} ignored", id);
            return Ok(false);
        }

        let candidate = self
            .products
            .iter()
            .filter(|product| product.id != id)
            .cloned()
            .collect();
        self.commit(candidate)?;

        debug!("Removed product {}", id);
        Ok(true)
    }

    /// Overwrites the whole list (sample data). The id high-water mark only
    /// ever moves up.
    pub fn replace_all(&mut self, products: Vec<Product>) -> PortResult<()> {
        let mut seen = HashSet::with_capacity(products.len());
        if let Some(duplicate) = products.iter().find(|product| !seen.insert(product.id)) {
            return Err(PortError::DuplicateId(duplicate.id));
        }
        let next_id = next_id_after(&products).ok_or_else(|| {
            PortError::InvalidInput(format!("product id {} is reserved", ProductId::MAX))
        })?;

        self.commit(products)?;
        self.next_id = self.next_id.max(next_id);
        info!("Replaced product list ({} products)", self.products.len());
        Ok(())
    }

    /// Empties the store and deletes the persisted list. Ids are not reused
    /// afterwards.
    pub fn clear(&mut self) -> PortResult<()> {
        self.kv.remove(PRODUCTS_KEY)?;
        self.products.clear();
        info!("Cleared product list");
        Ok(())
    }

    /// A snapshot of the current list, in insertion order.
    pub fn all(&self) -> Vec<Product> {
        self.products.clone()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.iter().position(|product| product.id == id)
    }

    fn commit(&mut self, candidate: Vec<Product>) -> PortResult<()> {
        let encoded = encode_products(&candidate)?;
        self.kv.set(PRODUCTS_KEY, &encoded)?;
        self.products = candidate;
        Ok(())
    }
}

//=========================================================================================
// Serialization
//=========================================================================================

/// Serializes the list as a JSON array of product objects.
pub fn encode_products(products: &[Product]) -> PortResult<String> {
    serde_json::to_string(products).map_err(|e| PortError::Storage(e.to_string()))
}

pub fn decode_products(raw: &str) -> PortResult<Vec<Product>> {
    serde_json::from_str(raw).map_err(|e| PortError::Corrupt(e.to_string()))
}

/// Drops records that would break the store invariants (repeated ids, the
/// reserved id `ProductId::MAX`, non-positive or non-finite prices).
fn sanitize(records: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|product| {
            if product.id == ProductId::MAX {
                warn!("Dropping stored product with reserved id {}", product.id);
                return false;
            }
            if !(product.price.is_finite() && product.price > 0.0) {
                warn!("Dropping stored product {} with invalid price", product.id);
                return false;
            }
            if !seen.insert(product.id) {
                warn!("Dropping stored product with duplicate id {}", product.id);
                return false;
            }
            true
        })
        .collect()
}

/// One past the highest id, or `None` when the highest id is `ProductId::MAX`.
fn next_id_after(products: &[Product]) -> Option<ProductId> {
    products
        .iter()
        .map(|product| product.id)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, PLACEHOLDER_IMAGE};
    use crate::kv::MemoryKeyValueStore;
    use proptest::prelude::*;

    /// Accepts reads but refuses every write, like a full browser quota.
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> PortResult<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> PortResult<()> {
            Err(PortError::Storage("quota exceeded".to_string()))
        }
        fn remove(&self, _key: &str) -> PortResult<()> {
            Ok(())
        }
    }

    fn payload(name: &str, price: f64, stock: u32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: Category::Tablets,
            price,
            stock,
            description: String::new(),
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    fn empty_store() -> (Arc<MemoryKeyValueStore>, ProductStore) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = ProductStore::load(kv.clone());
        (kv, store)
    }

    fn persisted(kv: &MemoryKeyValueStore) -> Vec<Product> {
        decode_products(&kv.get(PRODUCTS_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn create_assigns_increasing_ids_and_persists() {
        let (kv, mut store) = empty_store();
        let first = store.create(payload("iPad Air", 5999.99, 8)).unwrap();
        let second = store.create(payload("iPad Mini", 3999.99, 3)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(persisted(&kv), store.all());
    }

    #[test]
    fn ids_are_not_reused_after_removing_the_newest() {
        let (_kv, mut store) = empty_store();
        store.create(payload("One", 1.0, 1)).unwrap();
        let two = store.create(payload("Two", 1.0, 1)).unwrap();
        store.remove(two.id).unwrap();

        let three = store.create(payload("Three", 1.0, 1)).unwrap();
        assert_eq!(three.id, 3);
    }

    #[test]
    fn update_merges_fields_and_persists() {
        let (kv, mut store) = empty_store();
        let created = store.create(payload("iPad Air", 5999.99, 8)).unwrap();

        let patch = ProductPatch {
            stock: Some(2),
            ..ProductPatch::default()
        };
        let updated = store.update(created.id, patch).unwrap().unwrap();

        assert_eq!(updated.stock, 2);
        assert_eq!(updated.name, "iPad Air");
        assert_eq!(persisted(&kv)[0].stock, 2);
    }

    #[test]
    fn update_of_unknown_id_is_a_no_op() {
        let (kv, mut store) = empty_store();
        store.create(payload("iPad Air", 5999.99, 8)).unwrap();
        let before = kv.get(PRODUCTS_KEY).unwrap();

        let result = store.update(99, ProductPatch::default()).unwrap();

        assert!(result.is_none());
        assert_eq!(kv.get(PRODUCTS_KEY).unwrap(), before);
    }

    #[test]
    fn remove_of_unknown_id_leaves_store_unchanged() {
        let (_kv, mut store) = empty_store();
        store.create(payload("iPad Air", 5999.99, 8)).unwrap();
        let before = store.all();

        assert!(!store.remove(42).unwrap());
        assert_eq!(store.all(), before);
    }

    #[test]
    fn replace_all_rejects_duplicate_ids() {
        let (_kv, mut store) = empty_store();
        let product = payload("Dup", 1.0, 1).into_product(7);
        let err = store
            .replace_all(vec![product.clone(), product])
            .unwrap_err();

        assert_eq!(err, PortError::DuplicateId(7));
        assert!(store.is_empty());
    }

    #[test]
    fn replace_all_with_empty_list_clears_persisted_data() {
        let (kv, mut store) = empty_store();
        store.create(payload("iPad Air", 5999.99, 8)).unwrap();
        store.replace_all(Vec::new()).unwrap();

        assert!(store.is_empty());
        assert!(persisted(&kv).is_empty());
    }

    #[test]
    fn failed_write_keeps_memory_unchanged() {
        let mut store = ProductStore::load(Arc::new(FullStore));
        let err = store.create(payload("iPad Air", 5999.99, 8)).unwrap_err();

        assert!(matches!(err, PortError::Storage(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_data_loads_as_empty() {
        let kv = Arc::new(MemoryKeyValueStore::with_entries([(PRODUCTS_KEY, "{not json")]));
        let store = ProductStore::load(kv);
        assert!(store.is_empty());
    }

    #[test]
    fn load_drops_duplicate_ids_and_bad_prices() {
        let raw = r#"[
            {"id":1,"name":"A","category":"Tablets","price":10,"stock":1},
            {"id":1,"name":"B","category":"Tablets","price":10,"stock":1},
            {"id":2,"name":"C","category":"Tablets","price":0,"stock":1}
        ]"#;
        let kv = Arc::new(MemoryKeyValueStore::with_entries([(PRODUCTS_KEY, raw)]));
        let mut store = ProductStore::load(kv);

        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].name, "A");
        let created = store.create(payload("D", 1.0, 1)).unwrap();
        assert_eq!(created.id, 2);
    }

    #[test]
    fn load_drops_the_reserved_max_id_without_panicking() {
        let raw = format!(
            r#"[{{"id":{},"name":"Max","category":"Tablets","price":1,"stock":1}},
                {{"id":4,"name":"Four","category":"Tablets","price":1,"stock":1}}]"#,
            ProductId::MAX
        );
        let kv = Arc::new(MemoryKeyValueStore::with_entries([(PRODUCTS_KEY, raw)]));
        let mut store = ProductStore::load(kv);

        assert_eq!(store.len(), 1);
        assert_eq!(store.create(payload("Five", 1.0, 1)).unwrap().id, 5);
    }

    #[test]
    fn create_refuses_to_wrap_around() {
        let (_kv, mut store) = empty_store();
        store
            .replace_all(vec![payload("Last", 1.0, 1).into_product(ProductId::MAX - 1)])
            .unwrap();

        assert_eq!(
            store.create(payload("Overflow", 1.0, 1)).unwrap_err(),
            PortError::IdsExhausted
        );
        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.replace_all(vec![payload("Max", 1.0, 1).into_product(ProductId::MAX)]),
            Err(PortError::InvalidInput(_))
        ));
    }

    #[test]
    fn ids_keep_rising_after_clear_and_replace() {
        let (kv, mut store) = empty_store();
        store.create(payload("One", 1.0, 1)).unwrap();
        store.create(payload("Two", 1.0, 1)).unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(kv.get(PRODUCTS_KEY).unwrap(), None);
        assert_eq!(store.create(payload("Three", 1.0, 1)).unwrap().id, 3);

        store
            .replace_all(vec![payload("Sample", 1.0, 1).into_product(1)])
            .unwrap();
        assert_eq!(store.create(payload("Four", 1.0, 1)).unwrap().id, 4);
    }

    #[test]
    fn all_returns_a_detached_snapshot() {
        let (_kv, mut store) = empty_store();
        store.create(payload("iPad Air", 5999.99, 8)).unwrap();

        let mut snapshot = store.all();
        snapshot.clear();
        assert_eq!(store.len(), 1);
    }

    fn arb_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            (
                "[A-Za-z0-9 \"',<>&]{0,24}",
                arb_category(),
                0.01f64..1_000_000.0,
                0u32..10_000,
                "[a-zA-Z ]{0,32}",
            ),
            0..12,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, category, price, stock, description))| Product {
                    id: i as ProductId + 1,
                    name,
                    category,
                    price,
                    stock,
                    description,
                    image: PLACEHOLDER_IMAGE.to_string(),
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn encoding_round_trips(products in arb_products()) {
            let encoded = encode_products(&products).unwrap();
            prop_assert_eq!(decode_products(&encoded).unwrap(), products);
        }

        #[test]
        fn reload_reproduces_the_saved_list(products in arb_products()) {
            let kv = Arc::new(MemoryKeyValueStore::new());
            let mut store = ProductStore::load(kv.clone());
            store.replace_all(products.clone()).unwrap();

            let reloaded = ProductStore::load(kv);
            prop_assert_eq!(reloaded.all(), products);
        }
    }
}
