use alloy_primitives::{
   U256,
   utils::{format_units, parse_units},
};
use serde::{Deserialize, Serialize};

/// Represents a numeric value in different formats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericValue {
   pub wei: U256,
   pub f64: f64,
   pub formatted: String,
}

impl Default for NumericValue {
   fn default() -> Self {
      Self {
         wei: U256::ZERO,
         f64: 0.0,
         formatted: "0".to_string(),
      }
   }
}

// Builders

impl NumericValue {
   /// Format a wei value to a readable format
   ///
   /// Example:
   /// ```
   /// use rigo_eth::value::NumericValue;
   /// use alloy_primitives::U256;
   ///
   /// // 1 ETH in wei
   /// let wei = U256::from(1000000000000000000u128);
   /// let value = NumericValue::format_wei(wei, 18);
   /// assert_eq!(value.wei(), wei);
   /// assert_eq!(value.f64(), 1.0);
   /// assert_eq!(value.formatted(), "1");
   /// ```
   pub fn format_wei(wei: U256, decimals: u8) -> Self {
      let formatted_units = format_units(wei, decimals).unwrap_or("0".to_string());
      let f64 = formatted_units.parse().unwrap_or(0.0);
      let formatted = format_number(&formatted_units, 2, true);

      Self {
         wei,
         f64,
         formatted,
      }
   }

   /// Parse an amount doing the 10^decimals conversion
   ///
   /// If the amount does not parse, the value is zero
   ///
   /// Example:
   /// ```
   /// use rigo_eth::value::NumericValue;
   /// use alloy_primitives::U256;
   ///
   /// let value = NumericValue::parse_to_wei("0.05", 18);
   /// assert_eq!(value.wei(), U256::from(50000000000000000u128));
   /// ```
   pub fn parse_to_wei(amount: &str, currency_decimals: u8) -> Self {
      let wei = if let Ok(units) = parse_units(amount, currency_decimals) {
         units.get_absolute()
      } else {
         U256::ZERO
      };

      Self::format_wei(wei, currency_decimals)
   }

   /// Format a wei value to gwei in a readable format
   pub fn format_to_gwei(amount: U256) -> Self {
      Self::format_wei(amount, 9)
   }

   /// Parse an amount doing the 10^9 conversion
   pub fn parse_to_gwei(amount: &str) -> Self {
      Self::parse_to_wei(amount, 9)
   }

   /// Create a new NumericValue to represent a currency balance
   pub fn currency_balance(balance: U256, currency_decimals: u8) -> Self {
      Self::format_wei(balance, currency_decimals)
   }

   pub fn is_zero(&self) -> bool {
      self.f64 == 0.0
   }

   pub fn wei(&self) -> U256 {
      self.wei
   }

   pub fn f64(&self) -> f64 {
      self.f64
   }

   pub fn formatted(&self) -> &String {
      &self.formatted
   }

   /// Remove the commas from the formatted string
   pub fn flatten(&self) -> String {
      self.formatted.replace(",", "")
   }
}

pub fn truncate_address(s: &str, max_len: usize) -> String {
   if s.len() <= max_len {
      return s.to_string();
   }
   let prefix_len = 6;
   let suffix_len = 6;
   format!("{}...{}", &s[..prefix_len], &s[s.len() - suffix_len..])
}

/// Format a very large number into a readable string
pub fn format_number(amount_str: &str, decimal_places: usize, trim_trailing_zeros: bool) -> String {
   let parts: Vec<&str> = amount_str.split('.').collect();
   let integer_part = parts[0];
   let decimal_part = if parts.len() > 1 { parts[1] } else { "0" };

   let formatted_integer = add_thousands_separators(integer_part);

   // Amounts below 1 keep more precision
   let effective_decimal_places = if integer_part == "0" {
      6
   } else {
      decimal_places
   };

   if effective_decimal_places == 0 {
      formatted_integer
   } else {
      let decimal_to_show = if decimal_part.len() < effective_decimal_places {
         format!(
            "{:0<width$}",
            decimal_part,
            width = effective_decimal_places
         )
      } else {
         decimal_part[..effective_decimal_places].to_string()
      };

      let mut result = format!("{}.{}", formatted_integer, decimal_to_show);

      if trim_trailing_zeros {
         while result.ends_with('0') {
            result.pop();
         }
         if result.ends_with('.') {
            result.pop();
         }
      }
      result
   }
}

fn add_thousands_separators(number: &str) -> String {
   let mut result = String::new();
   let chars: Vec<char> = number.chars().rev().collect();
   for (i, c) in chars.iter().enumerate() {
      if i > 0 && i % 3 == 0 {
         result.insert(0, ',');
      }
      result.insert(0, *c);
   }
   result
}

#[cfg(test)]
mod tests {
   use super::*;
   use alloy_primitives::utils::parse_ether;

   #[test]
   fn test_parse_to_wei() {
      // 1 ETH
      let value = NumericValue::parse_to_wei("1", 18);
      assert_eq!(value.wei(), U256::from(1000000000000000000u128));
      assert_eq!(value.f64, 1.0);
      assert_eq!(value.formatted, "1");

      // 0.001294885 ETH
      let value = NumericValue::parse_to_wei("0.001294885", 18);
      assert_eq!(value.wei(), U256::from(1294885000000000u128));
      assert_eq!(value.f64, 0.001294885);
      assert_eq!(value.formatted, "0.001294");
   }

   #[test]
   fn test_parse_to_wei_low_amount() {
      let value = NumericValue::parse_to_wei("0.000001", 18);
      assert_eq!(value.wei(), U256::from(1000000000000u128));
      assert_eq!(value.f64, 0.000001);
      assert_eq!(value.formatted, "0.000001");
   }

   #[test]
   fn test_parse_to_wei_bad_input() {
      let value = NumericValue::parse_to_wei("not a number", 18);
      assert!(value.is_zero());
      assert_eq!(value.wei(), U256::ZERO);
   }

   #[test]
   fn test_parse_to_wei_negative_keeps_absolute_value() {
      // parse_units keeps the absolute value, callers must reject the sign
      let value = NumericValue::parse_to_wei("-1", 18);
      assert_eq!(value.wei(), U256::from(1000000000000000000u128));
   }

   #[test]
   fn test_parse_to_gwei() {
      let value = NumericValue::parse_to_gwei("1");
      assert_eq!(value.wei(), U256::from(1000000000u128));
      assert_eq!(value.f64, 1.0);
      assert_eq!(value.formatted, "1");

      let value = NumericValue::parse_to_gwei("0.000000070");
      assert_eq!(value.wei(), U256::from(70u128));
      assert_eq!(value.f64, 0.000000070);
      assert_eq!(value.formatted, "0");
   }

   #[test]
   fn test_format_to_gwei() {
      let value = NumericValue::format_to_gwei(U256::from(1000000000u128));
      assert_eq!(value.wei(), U256::from(1000000000u128));
      assert_eq!(value.f64, 1.0);
      assert_eq!(value.formatted, "1");
   }

   #[test]
   fn test_low_amount_balance() {
      let amount = parse_ether("0.001834247995202872").unwrap();
      let value = NumericValue::currency_balance(amount, 18);
      assert_eq!(value.f64, 0.001834247995202872);
      assert_eq!(value.formatted, "0.001834");
   }

   #[test]
   fn test_high_amount_balance() {
      let amount = parse_ether("2133.073141862605681577").unwrap();
      let value = NumericValue::currency_balance(amount, 18);
      assert_eq!(value.f64, 2133.073141862605681577);
      assert_eq!(value.formatted, "2,133.07");
      assert_eq!(value.flatten(), "2133.07");
   }

   #[test]
   fn test_truncate_address() {
      let address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
      assert_eq!(truncate_address(address, 20), "0xd8dA...A96045");
      assert_eq!(truncate_address("0xabc", 20), "0xabc");
   }
}
