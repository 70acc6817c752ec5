use contracts::subscription_matching::{ProductId, ProductMap, SubscriptionMatchingData, SystemMap};
use std::sync::Arc;

/// Matcher data as the views receive it.
///
/// Views detect changes by pointer identity of these snapshots, so a part
/// only gets a new `Arc` when its content actually changed.
#[derive(Clone, Debug, Default)]
pub struct PageData {
    pub products: Arc<ProductMap>,
    pub systems: Arc<SystemMap>,
    pub unmatched_product_ids: Arc<Vec<ProductId>>,
}

impl From<SubscriptionMatchingData> for PageData {
    fn from(data: SubscriptionMatchingData) -> Self {
        Self {
            products: Arc::new(data.products),
            systems: Arc::new(data.systems),
            unmatched_product_ids: Arc::new(data.unmatched_product_ids),
        }
    }
}

impl PageData {
    /// Next snapshot, keeping the current `Arc` of every unchanged part
    pub fn updated(&self, data: SubscriptionMatchingData) -> Self {
        Self {
            products: keep_if_equal(&self.products, data.products),
            systems: keep_if_equal(&self.systems, data.systems),
            unmatched_product_ids: keep_if_equal(
                &self.unmatched_product_ids,
                data.unmatched_product_ids,
            ),
        }
    }
}

fn keep_if_equal<T: PartialEq>(current: &Arc<T>, next: T) -> Arc<T> {
    if **current == next {
        Arc::clone(current)
    } else {
        Arc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::subscription_matching::{Product, System, SystemType};

    fn data(system_name: &str) -> SubscriptionMatchingData {
        let mut data = SubscriptionMatchingData::default();
        data.products.insert(
            1,
            Product {
                product_name: "Prod A".to_string(),
                unmatched_system_count: 1,
                unmatched_system_ids: vec![10],
            },
        );
        data.systems.insert(
            10,
            System {
                name: system_name.to_string(),
                system_type: SystemType::NonVirtual,
            },
        );
        data.unmatched_product_ids = vec![1];
        data
    }

    #[test]
    fn test_update_keeps_identity_of_unchanged_parts() {
        let page = PageData::from(data("sys10"));
        let next = page.updated(data("sys10-renamed"));

        assert!(Arc::ptr_eq(&page.products, &next.products));
        assert!(Arc::ptr_eq(&page.unmatched_product_ids, &next.unmatched_product_ids));
        assert!(!Arc::ptr_eq(&page.systems, &next.systems));
        assert_eq!(next.systems[&10].name, "sys10-renamed");
    }
}
