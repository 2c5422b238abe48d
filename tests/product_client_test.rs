use actor_framework::mock::MockClient;
use chrono::Utc;
use dokan::auth::Shopkeeper;
use dokan::clients::{ProductClient, ShopClient};
use dokan::model::{GeoPoint, Product, ProductCreate, ProductId, ProductPatch, Shop, ShopId, UserId};
use dokan::product_actor::ProductError;

/// ProductClient against mocked Shop and Product stores, to pin down the exact sequence
/// of store calls around ownership checks.

const OWNER: Shopkeeper = Shopkeeper { id: UserId(1) };

fn shop() -> Shop {
    Shop {
        id: ShopId(1),
        name: "Corner Store".into(),
        shop_type: "grocery".into(),
        location: GeoPoint::new(23.8103, 90.4125).unwrap(),
        owner_id: OWNER.id,
        created_at: Utc::now(),
    }
}

fn rice() -> Product {
    Product {
        id: ProductId(7),
        name: "Rice".into(),
        category: "staples".into(),
        price: 50.0,
        stock: 10.0,
        shop_id: ShopId(1),
        created_at: Utc::now(),
    }
}

fn rice_create() -> ProductCreate {
    ProductCreate {
        name: "Rice".into(),
        category: "staples".into(),
        price: 50.0,
        stock: 10.0,
        shop_id: ShopId(1),
    }
}

#[tokio::test]
async fn test_create_checks_shop_before_and_after_insert() {
    let mut shop_mock = MockClient::<Shop>::new();
    let mut product_mock = MockClient::<Product>::new();
    shop_mock.expect_get(ShopId(1)).return_ok(Some(shop()));
    product_mock.expect_create().return_ok(ProductId(7));
    shop_mock.expect_get(ShopId(1)).return_ok(Some(shop()));
    product_mock.expect_get(ProductId(7)).return_ok(Some(rice()));

    let products = ProductClient::new(product_mock.client(), ShopClient::new(shop_mock.client()));
    let created = products.create_product(&OWNER, rice_create()).await.unwrap();
    assert_eq!(created.id, ProductId(7));

    shop_mock.verify();
    product_mock.verify();
}

#[tokio::test]
async fn test_create_removes_product_when_shop_deleted_meanwhile() {
    let mut shop_mock = MockClient::<Shop>::new();
    let mut product_mock = MockClient::<Product>::new();
    shop_mock.expect_get(ShopId(1)).return_ok(Some(shop()));
    product_mock.expect_create().return_ok(ProductId(7));
    // The shop's cascade ran before the product was stored.
    shop_mock.expect_get(ShopId(1)).return_ok(None);
    product_mock.expect_delete(ProductId(7)).return_ok(());

    let products = ProductClient::new(product_mock.client(), ShopClient::new(shop_mock.client()));
    let err = products.create_product(&OWNER, rice_create()).await.unwrap_err();
    assert_eq!(err, ProductError::ShopNotFound(ShopId(1)));

    shop_mock.verify();
    product_mock.verify();
}

#[tokio::test]
async fn test_empty_patch_returns_product_without_update() {
    let mut shop_mock = MockClient::<Shop>::new();
    let mut product_mock = MockClient::<Product>::new();
    product_mock.expect_get(ProductId(7)).return_ok(Some(rice()));
    shop_mock.expect_get(ShopId(1)).return_ok(Some(shop()));

    let products = ProductClient::new(product_mock.client(), ShopClient::new(shop_mock.client()));
    let unchanged = products
        .update_product(&OWNER, ProductId(7), ProductPatch::default())
        .await
        .unwrap();
    assert_eq!(unchanged.price, 50.0);

    // No update request reached the store.
    shop_mock.verify();
    product_mock.verify();
}
