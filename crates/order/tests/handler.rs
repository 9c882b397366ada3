mod support;

use genproto::order::{
    CreateOrderItemRequest, CreateOrderRequest, FindByAccountRequest,
    order_command_service_server::OrderCommandService as _,
    order_query_service_server::OrderQueryService as _,
};
use order::{
    guard::CALLER_ID_METADATA_KEY,
    handler::order::{OrderCommandGrpcServiceImpl, OrderQueryGrpcServiceImpl},
};
use std::sync::{Arc, atomic::Ordering};
use support::Harness;
use tonic::{Code, Request, metadata::MetadataValue};

fn with_caller<T>(message: T, caller: &'static str) -> Request<T> {
    let mut request = Request::new(message);
    request
        .metadata_mut()
        .insert(CALLER_ID_METADATA_KEY, MetadataValue::from_static(caller));
    request
}

fn create_request(account_id: &str) -> CreateOrderRequest {
    CreateOrderRequest {
        account_id: account_id.into(),
        items: vec![
            CreateOrderItemRequest {
                product_id: "P1".into(),
                quantity: 2,
            },
            CreateOrderItemRequest {
                product_id: "P2".into(),
                quantity: 1,
            },
        ],
    }
}

#[tokio::test]
async fn missing_caller_is_unauthenticated() {
    let h = Harness::builder().build();
    let command = OrderCommandGrpcServiceImpl::new(Arc::new(h.command.clone()));
    let query = OrderQueryGrpcServiceImpl::new(Arc::new(h.query.clone()));

    let status = command
        .create(Request::new(create_request("42")))
        .await
        .expect_err("no caller");
    assert_eq!(status.code(), Code::Unauthenticated);

    let status = query
        .find_by_account(Request::new(FindByAccountRequest {
            account_id: "42".into(),
        }))
        .await
        .expect_err("no caller");
    assert_eq!(status.code(), Code::Unauthenticated);

    assert_eq!(h.accounts.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.store.reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn mismatched_caller_is_permission_denied() {
    let h = Harness::builder().build();
    let query = OrderQueryGrpcServiceImpl::new(Arc::new(h.query.clone()));

    let status = query
        .find_by_account(with_caller(
            FindByAccountRequest {
                account_id: "99".into(),
            },
            "42",
        ))
        .await
        .expect_err("other account");

    assert_eq!(status.code(), Code::PermissionDenied);
}

#[tokio::test]
async fn create_then_list_over_grpc() {
    let h = Harness::builder().build();
    let command = OrderCommandGrpcServiceImpl::new(Arc::new(h.command.clone()));
    let query = OrderQueryGrpcServiceImpl::new(Arc::new(h.query.clone()));

    let created = command
        .create(with_caller(create_request("42"), "42"))
        .await
        .expect("created")
        .into_inner();

    assert_eq!(created.status, "success");
    let order = created.data.expect("order data");
    assert_eq!(order.total_price, 25.0);
    assert_eq!(order.items.len(), 2);

    h.products.remove("P2");

    let listed = query
        .find_by_account(with_caller(
            FindByAccountRequest {
                account_id: "42".into(),
            },
            "42",
        ))
        .await
        .expect("listed")
        .into_inner();

    assert_eq!(listed.data.len(), 1);
    assert_eq!(listed.data[0].id, order.id);
    assert_eq!(listed.data[0].items[0].name, "Product P1");
    // gone from the catalog, so the decoration is empty
    assert_eq!(listed.data[0].items[1].name, "");
    assert_eq!(listed.data[0].items[1].quantity, 1);
}

#[tokio::test]
async fn invalid_quantity_is_invalid_argument() {
    let h = Harness::builder().build();
    let command = OrderCommandGrpcServiceImpl::new(Arc::new(h.command.clone()));

    let mut req = create_request("42");
    req.items[0].quantity = 0;

    let status = command
        .create(with_caller(req, "42"))
        .await
        .expect_err("bad quantity");

    assert_eq!(status.code(), Code::InvalidArgument);
}
