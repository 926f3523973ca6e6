use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/products.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    // Either a bare array of products or {"products": [...]}
    let products = catalog
        .as_array()
        .or_else(|| catalog.get("products").and_then(|p| p.as_array()))
        .unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: Root must be an array of products\n\
                 or an object with a 'products' array.\n"
            );
        });

    let with_ingredients = validate_products(products);

    println!(
        "cargo:warning=Validated catalog: {} products, {with_ingredients} with ingredient text",
        products.len()
    );
}

fn validate_products(products: &[serde_json::Value]) -> usize {
    let mut with_ingredients = 0;

    for (i, product) in products.iter().enumerate() {
        assert!(
            product.is_object(),
            "\n\nCATALOG BUILD ERROR: Product at index {i} is not an object\n"
        );
        validate_product_code(product, i);

        let has_text = product
            .get("ingredients_text")
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.trim().is_empty());
        if has_text {
            with_ingredients += 1;
        }
    }

    with_ingredients
}

fn validate_product_code(product: &serde_json::Value, index: usize) {
    let code = product.get("code").unwrap_or_else(|| {
        panic!("\n\nCATALOG BUILD ERROR: Product at index {index} missing 'code' field\n");
    });

    let code = match code {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => panic!(
            "\n\nCATALOG BUILD ERROR: Product at index {index} has non-scalar 'code'\n\
             Got: {other}\n"
        ),
    };

    assert!(
        !code.is_empty(),
        "\n\nCATALOG BUILD ERROR: Product at index {index} has an empty 'code'\n\
         Codes must be non-empty.\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/products.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
