//! End-to-end catalog scenarios over the in-memory stores.

use application::{ApplicationError, CategoryService, ProductService};
use domain::{ErrorKind, Money};
use store::{InMemoryCategoryStore, InMemoryProductStore};

fn money(s: &str) -> Money {
    s.parse().unwrap()
}

fn services() -> (
    CategoryService<InMemoryCategoryStore, InMemoryProductStore>,
    ProductService<InMemoryProductStore, InMemoryCategoryStore>,
) {
    let categories = InMemoryCategoryStore::new();
    let products = InMemoryProductStore::with_categories(&categories);
    (
        CategoryService::new(categories.clone(), products.clone()),
        ProductService::new(products, categories),
    )
}

#[tokio::test]
async fn stock_adjustments_accumulate_and_insufficient_stock_is_rejected() {
    let (category_service, product_service) = services();

    let electronics = category_service
        .create("Electronics", Some("Electronic devices"))
        .await
        .unwrap();
    let notebook = product_service
        .create(
            "Notebook",
            Some("15 inch"),
            money("2999.99"),
            10,
            electronics.id(),
        )
        .await
        .unwrap();

    let adjusted = product_service
        .adjust_stock(notebook.id(), -3)
        .await
        .unwrap();
    assert_eq!(adjusted.stock_quantity(), 7);

    let err = product_service
        .adjust_stock(notebook.id(), -10)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.to_string().contains("Available: 7"));
    assert!(err.to_string().contains("Requested: 10"));

    // The failed adjustment left the stock untouched.
    let reloaded = product_service.find_by_id(notebook.id()).await.unwrap();
    assert_eq!(reloaded.stock_quantity(), 7);
}

#[tokio::test]
async fn category_with_active_products_cannot_be_deleted() {
    let (category_service, product_service) = services();

    let electronics = category_service.create("Electronics", None).await.unwrap();
    product_service
        .create("Notebook", None, money("2999.99"), 10, electronics.id())
        .await
        .unwrap();

    let err = category_service
        .delete(electronics.id())
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::CategoryInUse { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // Nothing was deleted.
    assert!(category_service.find_by_id(electronics.id()).await.is_ok());
}

#[tokio::test]
async fn category_becomes_deletable_once_its_products_are_soft_deleted() {
    let (category_service, product_service) = services();

    let electronics = category_service.create("Electronics", None).await.unwrap();
    let notebook = product_service
        .create("Notebook", None, money("2999.99"), 10, electronics.id())
        .await
        .unwrap();

    product_service.delete(notebook.id()).await.unwrap();
    category_service.delete(electronics.id()).await.unwrap();
}

#[tokio::test]
async fn concurrent_decrements_never_oversell_the_last_unit() {
    let (category_service, product_service) = services();

    let electronics = category_service.create("Electronics", None).await.unwrap();
    let gadget = product_service
        .create("Gadget", None, money("49.90"), 1, electronics.id())
        .await
        .unwrap();

    let first = {
        let service = product_service.clone();
        let id = gadget.id();
        tokio::spawn(async move { service.adjust_stock(id, -1).await })
    };
    let second = {
        let service = product_service.clone();
        let id = gadget.id();
        tokio::spawn(async move { service.adjust_stock(id, -1).await })
    };

    let results = [first.await.unwrap(), second.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let failure = results
        .iter()
        .find_map(|r| r.as_ref().err())
        .expect("one adjustment must lose");
    assert_eq!(failure.kind(), ErrorKind::InvalidArgument);

    let reloaded = product_service.find_by_id(gadget.id()).await.unwrap();
    assert_eq!(reloaded.stock_quantity(), 0);
}

#[tokio::test]
async fn soft_deleted_product_is_invisible_to_every_lookup() {
    let (category_service, product_service) = services();

    let electronics = category_service.create("Electronics", None).await.unwrap();
    let notebook = product_service
        .create("Notebook", None, money("2999.99"), 10, electronics.id())
        .await
        .unwrap();
    product_service.delete(notebook.id()).await.unwrap();

    assert_eq!(
        product_service
            .find_by_id(notebook.id())
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        product_service
            .adjust_stock(notebook.id(), 5)
            .await
            .unwrap_err()
            .kind(),
        ErrorKind::NotFound
    );

    // The name is free for reuse within the category.
    product_service
        .create("Notebook", None, money("1999.99"), 5, electronics.id())
        .await
        .unwrap();
}
