//! Rate service - rate table access and the refresh job entry point

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::RateTable;
use crate::ports::{RateFetcher, RateStore};

/// Read access to the rate table plus the refresh job
pub struct RateService {
    rates: Arc<dyn RateStore>,
}

impl RateService {
    pub fn new(rates: Arc<dyn RateStore>) -> Self {
        Self { rates }
    }

    /// The persisted rate table
    pub fn table(&self) -> Result<RateTable> {
        self.rates.load_rates()
    }

    /// Fetch fresh rates from an upstream source and persist them,
    /// replacing the table wholesale
    pub fn refresh(&self, fetcher: &dyn RateFetcher) -> Result<RateTable> {
        let table = fetcher.fetch()?;
        self.rates.save_rates(&table)?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::result::Error;
    use chrono::Utc;
    use rust_decimal::Decimal;

    struct StubFetcher {
        table: std::result::Result<RateTable, String>,
    }

    impl RateFetcher for StubFetcher {
        fn fetch(&self) -> Result<RateTable> {
            self.table.clone().map_err(Error::Rates)
        }
    }

    #[test]
    fn test_refresh_replaces_table() {
        let store = Arc::new(MemoryStore::new(RateTable::empty("USD")));
        let service = RateService::new(store.clone());

        let mut fresh = RateTable::empty("USD");
        fresh.last_updated = Some(Utc::now());
        fresh.rates.insert("EUR".to_string(), Decimal::new(94, 2));
        let fetcher = StubFetcher {
            table: Ok(fresh.clone()),
        };

        let table = service.refresh(&fetcher).unwrap();
        assert_eq!(table, fresh);
        assert_eq!(service.table().unwrap(), fresh);
    }

    #[test]
    fn test_failed_refresh_keeps_old_table() {
        let mut seeded = RateTable::empty("USD");
        seeded.rates.insert("EUR".to_string(), Decimal::new(9, 1));
        let store = Arc::new(MemoryStore::new(seeded.clone()));
        let service = RateService::new(store);

        let fetcher = StubFetcher {
            table: Err("upstream down".to_string()),
        };
        assert!(service.refresh(&fetcher).is_err());
        assert_eq!(service.table().unwrap(), seeded);
    }
}
