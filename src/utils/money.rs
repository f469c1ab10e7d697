//! 金额转换: 数据库存美分 (i64)，接口层使用两位小数的 Decimal

use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// 接口传入的金额 -> 美分。负数或超过两位小数视为非法输入
pub fn decimal_to_cents(amount: Decimal) -> AppResult<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::ValidationError(
            "Price must not be negative".to_string(),
        ));
    }
    if amount.normalize().scale() > 2 {
        return Err(AppError::ValidationError(
            "Price must have at most 2 decimal places".to_string(),
        ));
    }
    (amount * Decimal::ONE_HUNDRED)
        .trunc()
        .to_i64()
        .ok_or_else(|| AppError::ValidationError("Price is out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_cents_to_decimal() {
        assert_eq!(cents_to_decimal(9999), Decimal::from_str("99.99").unwrap());
        assert_eq!(cents_to_decimal(0), Decimal::ZERO);
        assert_eq!(cents_to_decimal(5000).to_string(), "50.00");
    }

    #[test]
    fn test_decimal_to_cents() {
        assert_eq!(decimal_to_cents(Decimal::from_str("99.99").unwrap()).unwrap(), 9999);
        assert_eq!(decimal_to_cents(Decimal::from_str("12.5").unwrap()).unwrap(), 1250);
        assert_eq!(decimal_to_cents(Decimal::from_str("7.000").unwrap()).unwrap(), 700);
        assert_eq!(decimal_to_cents(Decimal::ZERO).unwrap(), 0);
    }

    #[test]
    fn test_decimal_to_cents_rejects_invalid() {
        assert!(decimal_to_cents(Decimal::from_str("-1").unwrap()).is_err());
        assert!(decimal_to_cents(Decimal::from_str("1.999").unwrap()).is_err());
    }
}
