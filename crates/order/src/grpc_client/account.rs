use crate::{
    abstract_trait::grpc_client::AccountGrpcClientTrait,
    domain::response::account::AccountResponse, guard::CallerIdentity,
};
use async_trait::async_trait;
use genproto::account::{
    AccountResponse as AccountReply, GetAccountRequest,
    account_service_client::AccountServiceClient as AccountServiceGrpcClient,
};
use opentelemetry::Context;
use shared::{
    errors::{ServiceError, grpc_status_to_service_error},
    utils::inject_trace_context,
};
use tonic::{Code, Request, Status, transport::Channel};
use tracing::{error, info};

pub struct AccountGrpcClientService {
    client: AccountServiceGrpcClient<Channel>,
}

impl AccountGrpcClientService {
    pub fn new(client: AccountServiceGrpcClient<Channel>) -> Self {
        Self { client }
    }
}

fn account_request(
    cx: &Context,
    id: &str,
    caller: &CallerIdentity,
) -> Result<Request<GetAccountRequest>, ServiceError> {
    let mut req = Request::new(GetAccountRequest { id: id.to_string() });

    caller.attach(&mut req)?;
    inject_trace_context(cx, &mut req);

    Ok(req)
}

fn status_to_account_error(id: &str, status: Status) -> ServiceError {
    match status.code() {
        Code::NotFound => ServiceError::AccountNotFound(id.to_string()),
        _ => grpc_status_to_service_error(status),
    }
}

fn account_from_reply(id: &str, reply: AccountReply) -> Result<AccountResponse, ServiceError> {
    reply
        .account
        .map(AccountResponse::from)
        .ok_or_else(|| ServiceError::AccountNotFound(id.to_string()))
}

#[async_trait]
impl AccountGrpcClientTrait for AccountGrpcClientService {
    async fn find_by_id(
        &self,
        cx: &Context,
        id: &str,
        caller: &CallerIdentity,
    ) -> Result<AccountResponse, ServiceError> {
        let req = account_request(cx, id, caller)?;

        // tonic clients are cheap handles over one shared channel
        let mut client = self.client.clone();

        let response = client.get_account(req).await.map_err(|status| {
            error!("❌ Account lookup for {id} failed: {status}");
            status_to_account_error(id, status)
        })?;

        let account = account_from_reply(id, response.into_inner())?;

        info!("👤 Verified account {}", account.id);
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::CALLER_ID_METADATA_KEY;
    use genproto::account::Account;

    #[test]
    fn request_carries_caller_identity() {
        let req = account_request(&Context::new(), "42", &CallerIdentity::new("42"))
            .expect("request");

        let forwarded = req
            .metadata()
            .get(CALLER_ID_METADATA_KEY)
            .and_then(|v| v.to_str().ok());
        assert_eq!(forwarded, Some("42"));
        assert_eq!(req.get_ref().id, "42");
    }

    #[test]
    fn not_found_means_unknown_account() {
        let err = status_to_account_error("42", Status::not_found("no such account"));

        assert!(matches!(err, ServiceError::AccountNotFound(id) if id == "42"));
    }

    #[test]
    fn other_statuses_are_classified() {
        assert!(matches!(
            status_to_account_error("42", Status::unavailable("down")),
            ServiceError::Upstream(_)
        ));
        assert!(matches!(
            status_to_account_error("42", Status::deadline_exceeded("slow")),
            ServiceError::Upstream(_)
        ));
        assert!(matches!(
            status_to_account_error("42", Status::unauthenticated("who")),
            ServiceError::Unauthenticated(_)
        ));
        assert!(matches!(
            status_to_account_error("42", Status::permission_denied("no")),
            ServiceError::Forbidden(_)
        ));
    }

    #[test]
    fn empty_reply_means_unknown_account() {
        let result = account_from_reply("42", AccountReply { account: None });

        assert!(matches!(result, Err(ServiceError::AccountNotFound(_))));
    }

    #[test]
    fn reply_converts_to_account() {
        let reply = AccountReply {
            account: Some(Account {
                id: "42".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
            }),
        };

        let account = account_from_reply("42", reply).expect("account");
        assert_eq!(account.email, "ada@example.com");
    }
}
