//! GraphQL query and request envelope for the product detail operation.

use serde::Serialize;

/// Operation name sent with every request.
pub const OPERATION_NAME: &str = "productDetail";

/// Product detail query: pricing, stock, promotions, benchmarks and bundle options.
pub const PRODUCT_DETAIL_QUERY: &str = r"query productDetail($sku: String) {
  productDetail: products(filter: {sku: {eq: $sku}}) {
    items {
      __typename
      sku
      name
      only_x_left_in_stock
      stock_status
      special_price
      mysales_promotion {
        expire_at
        price_discount
        price_promotional
        promotion_name
        promotion_url
        qty_available
        qty_sold
        __typename
      }
      pichauUlBenchmarkProduct {
        overallScore
        scoreCPU
        scoreGPU
        games {
          fullHdFps
          medium4k
          quadHdFps
          title
          ultra1080p
          ultra4k
          __typename
        }
        __typename
      }
      pichau_prices {
        avista
        avista_discount
        avista_method
        base_price
        final_price
        max_installments
        min_installment_price
        __typename
      }
      price_range {
        __typename
      }
      ... on BundleProduct {
        dynamic_sku
        dynamic_price
        dynamic_weight
        price_view
        ship_bundle_items
        options: items {
          option_id
          title
          required
          type
          position
          sku
          value: options {
            id
            uid
            quantity
            position
            is_default
            price
            price_type
            can_change_quantity
            title: label
            product {
              id
              name
              sku
              url_key
              stock_status
              slots_memoria
              portas_sata
              image {
                url
                url_listing
                path
                label
                __typename
              }
              __typename
            }
            __typename
          }
          __typename
        }
        __typename
      }
    }
    __typename
  }
}
";

/// Variables of the product detail query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkuVariables<'a> {
    pub sku: &'a str,
}

/// JSON body posted to the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailRequest<'a> {
    pub operation_name: &'static str,
    pub variables: SkuVariables<'a>,
    pub query: &'static str,
}

impl<'a> ProductDetailRequest<'a> {
    /// Builds the request envelope for a single SKU.
    pub fn new(sku: &'a str) -> Self {
        Self {
            operation_name: OPERATION_NAME,
            variables: SkuVariables { sku },
            query: PRODUCT_DETAIL_QUERY,
        }
    }

    /// Serializes the envelope to its JSON wire form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
