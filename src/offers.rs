//! Restaurant offers (coupons) as last fetched from the backend.

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use crate::backend::BackendClient;
use crate::domain::{Coupon, CouponDraft};
use crate::error::DeskError;

pub struct OfferBook {
    backend: BackendClient,
    offers: Vec<Coupon>,
}

impl OfferBook {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            offers: Vec::new(),
        }
    }

    pub fn offers(&self) -> &[Coupon] {
        &self.offers
    }

    /// Offers still valid on `date`. Expired ones are listed, never enforced.
    pub fn active_on(&self, date: NaiveDate) -> impl Iterator<Item = &Coupon> {
        self.offers.iter().filter(move |c| c.is_active_on(date))
    }

    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<usize, DeskError> {
        let offers = self.backend.list_coupons().await.map_err(|e| {
            warn!(error = %e, "Failed to fetch offers");
            DeskError::FetchFailed(e.to_string())
        })?;
        self.offers = offers;
        Ok(self.offers.len())
    }

    /// Creates an offer, then reloads the list so the new id is known.
    #[instrument(skip(self, draft), fields(code = %draft.code))]
    pub async fn create(&mut self, draft: &CouponDraft) -> Result<(), DeskError> {
        let payload = draft.validate()?;
        self.backend.create_coupon(payload).await?;
        info!("Offer created");
        self.refresh().await?;
        Ok(())
    }

    #[instrument(skip(self, draft), fields(code = %draft.code))]
    pub async fn update(&mut self, coupon_id: &str, draft: &CouponDraft) -> Result<(), DeskError> {
        let payload = draft.validate()?;
        let updated = self
            .backend
            .update_coupon(coupon_id.to_string(), payload)
            .await?;
        match self.offers.iter_mut().find(|c| c.id == coupon_id) {
            Some(existing) => *existing = updated,
            None => self.offers.push(updated),
        }
        info!("Offer updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self, coupon_id: &str) -> Result<(), DeskError> {
        self.backend.delete_coupon(coupon_id.to_string()).await?;
        self.offers.retain(|c| c.id != coupon_id);
        info!("Offer deleted");
        Ok(())
    }
}
