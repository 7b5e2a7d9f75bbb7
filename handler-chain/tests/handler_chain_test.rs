//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after order, a before hook stopping the chain, Reply ending the handle phase and
//! reaching after(), and after() still running when a handler fails.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use routebot_core::{
    Chat, Handler, HandlerError, HandlerResponse, Message, Result, RoutebotError, User,
};
use handler_chain::HandlerChain;

fn create_test_message(content: &str) -> Message {
    Message::text(
        "test_message_id",
        User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content,
    )
}

struct OrderHandler {
    name: &'static str,
    order: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl Handler for OrderHandler {
    async fn before(&self, _message: &Message) -> Result<bool> {
        self.order.lock().unwrap().push(format!("before_{}", self.name));
        Ok(true)
    }

    async fn after(&self, _message: &Message, _response: &HandlerResponse) -> Result<()> {
        self.order.lock().unwrap().push(format!("after_{}", self.name));
        Ok(())
    }
}

struct CountingHandler {
    handle_count: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl Handler for CountingHandler {
    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        self.handle_count.fetch_add(1, Ordering::SeqCst);
        Ok(HandlerResponse::Continue)
    }
}

struct ReplyHandler;

#[async_trait::async_trait]
impl Handler for ReplyHandler {
    async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
        Ok(HandlerResponse::Reply("Send me the destination.".to_string()))
    }
}

struct CaptureResponse {
    seen: Arc<Mutex<Vec<HandlerResponse>>>,
}

#[async_trait::async_trait]
impl Handler for CaptureResponse {
    async fn after(&self, _message: &Message, response: &HandlerResponse) -> Result<()> {
        self.seen.lock().unwrap().push(response.clone());
        Ok(())
    }
}

/// **Test: before runs first→last, after runs last→first.**
#[tokio::test]
async fn test_multiple_handlers_executed_in_order() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(OrderHandler {
            name: "first",
            order: order.clone(),
        }))
        .add_handler(Arc::new(OrderHandler {
            name: "second",
            order: order.clone(),
        }));

    let response = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(response, HandlerResponse::Continue);
    assert_eq!(
        *order.lock().unwrap(),
        vec!["before_first", "before_second", "after_second", "after_first"]
    );
}

/// **Test: a before hook returning false stops the chain; handle is never run.**
#[tokio::test]
async fn test_before_false_stops_chain() {
    struct BlockingHandler;

    #[async_trait::async_trait]
    impl Handler for BlockingHandler {
        async fn before(&self, _message: &Message) -> Result<bool> {
            Ok(false)
        }
    }

    let handle_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(BlockingHandler))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&create_test_message("test")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
}

/// **Test: Reply ends the handle phase; later handlers do not run; after() sees the reply.**
#[tokio::test]
async fn test_reply_stops_chain_and_passes_to_after() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let handle_count = Arc::new(AtomicUsize::new(0));

    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureResponse { seen: seen.clone() }))
        .add_handler(Arc::new(ReplyHandler))
        .add_handler(Arc::new(CountingHandler {
            handle_count: handle_count.clone(),
        }));

    let result = chain.handle(&create_test_message("Abay 10")).await.unwrap();

    let expected = HandlerResponse::Reply("Send me the destination.".to_string());
    assert_eq!(result, expected);
    assert_eq!(handle_count.load(Ordering::SeqCst), 0);
    assert_eq!(*seen.lock().unwrap(), vec![expected]);
}

/// **Test: a failing handler still lets after() run (with Stop) and the error is returned.**
#[tokio::test]
async fn test_handler_error_runs_after_and_propagates() {
    struct FailingHandler;

    #[async_trait::async_trait]
    impl Handler for FailingHandler {
        async fn handle(&self, _message: &Message) -> Result<HandlerResponse> {
            Err(HandlerError::UnknownAction("explode".to_string()).into())
        }
    }

    let seen = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(CaptureResponse { seen: seen.clone() }))
        .add_handler(Arc::new(FailingHandler));

    let err = chain.handle(&create_test_message("test")).await.unwrap_err();

    assert!(matches!(err, RoutebotError::Handler(HandlerError::UnknownAction(_))));
    assert_eq!(*seen.lock().unwrap(), vec![HandlerResponse::Stop]);
}

#[test]
fn test_empty_chain_len() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let chain = chain.add_handler(Arc::new(ReplyHandler));
    assert_eq!(chain.len(), 1);
}
