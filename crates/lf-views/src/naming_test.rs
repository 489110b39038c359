use super::*;

#[test]
fn test_snake_case() {
    assert_eq!(snake_case("GTINId"), "gtin_id");
    assert_eq!(snake_case("SupplierInformation"), "supplier_information");
    assert_eq!(snake_case("BuyingItem_GTIN"), "buying_item_gtin");
    assert_eq!(snake_case("createdAt"), "created_at");
    assert_eq!(snake_case("Item2Name"), "item2_name");
    assert_eq!(snake_case("already_snake"), "already_snake");
    assert_eq!(snake_case("lower"), "lower");
    assert_eq!(snake_case("double__under"), "double_under");
}

#[test]
fn test_snake_case_replaces_invalid_chars() {
    assert_eq!(snake_case("Zip Code"), "zip_code");
    assert_eq!(snake_case("unit-price"), "unit_price");
    assert_eq!(snake_case("Café"), "caf_");
}

#[test]
fn test_snake_case_is_idempotent() {
    for input in [
        "GTINId",
        "SupplierInformation",
        "BuyingItem_GTIN",
        "xYZw",
        "Zip Code",
        "__private",
        "a__B",
        "ABC",
        "Ünit",
    ] {
        let once = snake_case(input);
        assert_eq!(snake_case(&once), once, "input {input}");
    }
}

#[test]
fn test_sanitize_identifier() {
    assert_eq!(sanitize_identifier("9lives"), "_9lives");
    assert_eq!(sanitize_identifier("a____b"), "a__b");
    assert_eq!(sanitize_identifier("a__b"), "a__b");
    assert_eq!(sanitize_identifier("a-b c"), "a_b_c");
    assert_eq!(sanitize_identifier(""), "_");
}

#[test]
fn test_long_and_short_names() {
    assert_eq!(long_name(&["address", "city"]), "address__city");
    assert_eq!(
        long_name(&["SupplierInformation", "GTINId"]),
        "supplier_information__gtin_id"
    );
    assert_eq!(short_name(&["SupplierInformation", "GTINId"]), "gtin_id");
    assert_eq!(long_name(&["2024Sales"]), "_2024_sales");
    assert_eq!(short_name::<&str>(&[]), "_");
}

#[test]
fn test_round_trip_for_snake_input() {
    let segments = ["orders", "line_items", "sku"];
    let long = long_name(&segments);
    assert_eq!(long, "orders__line_items__sku");
    assert_eq!(long.rsplit("__").next(), Some(short_name(&segments).as_str()));
}

#[test]
fn test_title_case() {
    assert_eq!(title_case("order_items"), "Order Items");
    assert_eq!(title_case("ShippingAddress"), "Shipping Address");
    assert_eq!(title_case_path(&["Customer", "homeAddress"]), "Customer Home Address");
    assert_eq!(title_case(""), "");
}

#[test]
fn test_nested_view_name() {
    assert_eq!(
        nested_view_name("orders", &["LineItems", "Discounts"]),
        "orders__line_items__discounts"
    );
}
