#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::Context;
use order::{
    abstract_trait::{
        grpc_client::{AccountGrpcClientTrait, ProductGrpcClientTrait},
        order::repository::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
    },
    domain::{
        requests::order::{CreateOrderItemRequest, CreateOrderRecordRequest, CreateOrderRequest},
        response::{account::AccountResponse, product::ProductResponse},
    },
    guard::CallerIdentity,
    model::{
        order::{Order, OrderRecord},
        order_item::OrderItem,
    },
    service::order::{
        MissingProductPolicy, OrderCommandService, OrderCommandServiceDeps, OrderQueryService,
    },
};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::KafkaTrait,
    errors::{RepositoryError, ServiceError},
};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

pub fn caller(id: &str) -> CallerIdentity {
    CallerIdentity::new(id)
}

pub fn item(product_id: &str, quantity: i32) -> CreateOrderItemRequest {
    CreateOrderItemRequest {
        product_id: product_id.into(),
        quantity,
    }
}

pub fn order_request(account_id: &str, items: Vec<CreateOrderItemRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        account_id: account_id.into(),
        items,
    }
}

pub fn product(id: &str, price: f64) -> ProductResponse {
    ProductResponse {
        id: id.into(),
        name: format!("Product {id}"),
        description: format!("Description of {id}"),
        price,
    }
}

#[derive(Default)]
struct StoreState {
    orders: Vec<OrderRecord>,
    next_order_id: i32,
    next_item_id: i32,
}

/// Order store that behaves like the Postgres repository, including rollback
/// when an item insert fails part way.
#[derive(Default)]
pub struct InMemoryOrderStore {
    state: Mutex<StoreState>,
    fail_on_item: Option<usize>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl InMemoryOrderStore {
    /// Makes the `n`th item insert (1-based) of every write fail.
    pub fn failing_on_item(n: usize) -> Self {
        Self {
            fail_on_item: Some(n),
            ..Self::default()
        }
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().expect("store lock").orders.len()
    }

    pub fn orders(&self) -> Vec<OrderRecord> {
        self.state.lock().expect("store lock").orders.clone()
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for InMemoryOrderStore {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderRecord, RepositoryError> {
        self.writes.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().expect("store lock");

        let order = Order {
            order_id: state.next_order_id + 1,
            account_id: req.account_id.clone(),
            total_price: req.total_price,
            created_at: Utc::now().naive_utc(),
        };

        let mut next_item_id = state.next_item_id;
        let mut items = Vec::new();

        for (index, item) in req.items.iter().enumerate() {
            if self.fail_on_item == Some(index + 1) {
                // nothing staged so far becomes visible
                return Err(RepositoryError::Custom(format!(
                    "insert of {} failed",
                    item.product_id
                )));
            }

            next_item_id += 1;
            items.push(OrderItem {
                order_item_id: next_item_id,
                order_id: order.order_id,
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            });
        }

        state.next_order_id = order.order_id;
        state.next_item_id = next_item_id;

        let record = OrderRecord { order, items };
        state.orders.push(record.clone());

        Ok(record)
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for InMemoryOrderStore {
    async fn find_by_account(&self, account_id: &str) -> Result<Vec<OrderRecord>, RepositoryError> {
        self.reads.fetch_add(1, Ordering::SeqCst);

        let state = self.state.lock().expect("store lock");

        Ok(state
            .orders
            .iter()
            .filter(|record| record.order.account_id == account_id)
            .cloned()
            .map(|mut record| {
                record.items.sort_by(|a, b| a.product_id.cmp(&b.product_id));
                record
            })
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountBehavior {
    Exists,
    NotFound,
    Down,
}

pub struct FakeAccountClient {
    behavior: AccountBehavior,
    pub calls: AtomicUsize,
    pub last_caller: Mutex<Option<String>>,
}

impl FakeAccountClient {
    pub fn new(behavior: AccountBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_caller: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AccountGrpcClientTrait for FakeAccountClient {
    async fn find_by_id(
        &self,
        _cx: &Context,
        id: &str,
        caller: &CallerIdentity,
    ) -> Result<AccountResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_caller.lock().expect("caller lock") = Some(caller.account_id().to_string());

        match self.behavior {
            AccountBehavior::Exists => Ok(AccountResponse {
                id: id.to_string(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
            }),
            AccountBehavior::NotFound => Err(ServiceError::AccountNotFound(id.to_string())),
            AccountBehavior::Down => Err(ServiceError::Upstream("account-service down".into())),
        }
    }
}

#[derive(Default)]
pub struct FakeProductClient {
    catalog: Mutex<HashMap<String, ProductResponse>>,
    down: AtomicBool,
    pub calls: AtomicUsize,
    pub requested: Mutex<Vec<Vec<String>>>,
}

impl FakeProductClient {
    pub fn with_products(products: Vec<ProductResponse>) -> Self {
        let client = Self::default();
        for product in products {
            client.upsert(product);
        }
        client
    }

    pub fn upsert(&self, product: ProductResponse) {
        self.catalog
            .lock()
            .expect("catalog lock")
            .insert(product.id.clone(), product);
    }

    pub fn remove(&self, id: &str) {
        self.catalog.lock().expect("catalog lock").remove(id);
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductGrpcClientTrait for FakeProductClient {
    async fn find_by_ids(
        &self,
        _cx: &Context,
        ids: &[String],
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .expect("requested lock")
            .push(ids.to_vec());

        if self.down.load(Ordering::SeqCst) {
            return Err(ServiceError::Upstream("product-service down".into()));
        }

        let catalog = self.catalog.lock().expect("catalog lock");
        Ok(ids.iter().filter_map(|id| catalog.get(id).cloned()).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedMessage {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

#[derive(Default)]
pub struct RecordingKafka {
    fail: bool,
    pub attempts: AtomicUsize,
    messages: Mutex<Vec<PublishedMessage>>,
}

impl RecordingKafka {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn messages(&self) -> Vec<PublishedMessage> {
        self.messages.lock().expect("messages lock").clone()
    }

    /// Publishing happens on a spawned task, so give it a chance to run.
    pub async fn wait_for_attempts(&self, n: usize) {
        for _ in 0..100 {
            if self.attempts.load(Ordering::SeqCst) >= n {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

#[async_trait]
impl KafkaTrait for RecordingKafka {
    async fn publish(&self, topic: &str, key: &str, value: &[u8]) -> Result<(), ServiceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(ServiceError::Kafka("broker unreachable".into()));
        }

        self.messages
            .lock()
            .expect("messages lock")
            .push(PublishedMessage {
                topic: topic.to_string(),
                key: key.to_string(),
                payload: value.to_vec(),
            });

        Ok(())
    }
}

pub struct Harness {
    pub accounts: Arc<FakeAccountClient>,
    pub products: Arc<FakeProductClient>,
    pub store: Arc<InMemoryOrderStore>,
    pub kafka: Arc<RecordingKafka>,
    pub command: OrderCommandService,
    pub query: OrderQueryService,
    pub registry: Registry,
}

pub struct HarnessBuilder {
    account_behavior: AccountBehavior,
    products: Vec<ProductResponse>,
    store: InMemoryOrderStore,
    kafka: RecordingKafka,
    policy: MissingProductPolicy,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            account_behavior: AccountBehavior::Exists,
            products: vec![product("P1", 10.0), product("P2", 5.0)],
            store: InMemoryOrderStore::default(),
            kafka: RecordingKafka::default(),
            policy: MissingProductPolicy::Drop,
        }
    }
}

impl HarnessBuilder {
    pub fn account(mut self, behavior: AccountBehavior) -> Self {
        self.account_behavior = behavior;
        self
    }

    pub fn products(mut self, products: Vec<ProductResponse>) -> Self {
        self.products = products;
        self
    }

    pub fn store(mut self, store: InMemoryOrderStore) -> Self {
        self.store = store;
        self
    }

    pub fn kafka(mut self, kafka: RecordingKafka) -> Self {
        self.kafka = kafka;
        self
    }

    pub fn policy(mut self, policy: MissingProductPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Harness {
        let accounts = Arc::new(FakeAccountClient::new(self.account_behavior));
        let products = Arc::new(FakeProductClient::with_products(self.products));
        let store = Arc::new(self.store);
        let kafka = Arc::new(self.kafka);
        let mut registry = Registry::default();

        let command = OrderCommandService::new(
            OrderCommandServiceDeps {
                account_client: accounts.clone(),
                product_client: products.clone(),
                command: store.clone(),
                kafka: kafka.clone(),
                policy: self.policy,
            },
            &mut registry,
        );

        let query = OrderQueryService::new(store.clone(), products.clone(), &mut registry);

        Harness {
            accounts,
            products,
            store,
            kafka,
            command,
            query,
            registry,
        }
    }
}
