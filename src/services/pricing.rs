//! 优惠码定价
//!
//! 金额均为美分。折扣四舍五入到分，实付为原价减折扣，
//! 因此 `final_cents + discount_cents == original_cents` 恒成立。

use crate::config::PromoConfig;
use crate::error::AppError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Promo code is required for paid courses")]
    PromoCodeRequired,

    #[error("Invalid promo code")]
    InvalidPromoCode,
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub original_cents: i64,
    pub discount_cents: i64,
    pub final_cents: i64,
    /// 实际使用的优惠码（大写）；免费课程为 None
    pub promo_code: Option<String>,
}

impl PriceQuote {
    fn free() -> Self {
        Self {
            original_cents: 0,
            discount_cents: 0,
            final_cents: 0,
            promo_code: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromoPricing {
    code: String,
    discount_percent: u32,
}

impl PromoPricing {
    pub fn new(config: &PromoConfig) -> Self {
        Self {
            code: canonical_code(&config.code),
            discount_percent: config.discount_percent.min(100),
        }
    }

    pub fn discount_percent(&self) -> u32 {
        self.discount_percent
    }

    /// 校验优惠码，返回规范化后的优惠码
    pub fn check_code(&self, promo_code: &str) -> Result<String, PricingError> {
        let canonical = canonical_code(promo_code);
        if canonical.is_empty() {
            return Err(PricingError::PromoCodeRequired);
        }
        if canonical != self.code {
            return Err(PricingError::InvalidPromoCode);
        }
        Ok(canonical)
    }

    /// 计算订阅价格
    ///
    /// 免费课程忽略传入的优惠码；付费课程必须提供有效优惠码。
    pub fn quote(
        &self,
        price_cents: i64,
        promo_code: Option<&str>,
    ) -> Result<PriceQuote, PricingError> {
        if price_cents <= 0 {
            return Ok(PriceQuote::free());
        }

        let code = self.check_code(promo_code.unwrap_or_default())?;
        let discount_cents = self.discount_for(price_cents);

        Ok(PriceQuote {
            original_cents: price_cents,
            discount_cents,
            final_cents: price_cents - discount_cents,
            promo_code: Some(code),
        })
    }

    fn discount_for(&self, price_cents: i64) -> i64 {
        // round half up: (p * pct + 50) / 100, p >= 0
        let scaled = i128::from(price_cents) * i128::from(self.discount_percent);
        ((scaled + 50) / 100) as i64
    }
}

fn canonical_code(code: &str) -> String {
    code.trim().to_uppercase()
}
