#![allow(non_snake_case)]
#![allow(clippy::needless_return)]

use std::{any::{type_name, Any, TypeId}, collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::error::HandlerError;

//A command or query that can be sent through the mediator
pub trait Request: Send + 'static {
    type Response: Send + 'static;
}

#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> Result<R::Response, HandlerError>;
}

//Routes every request type to exactly one handler. Built once at startup, read-only afterwards.
#[derive(Default)]
pub struct Mediator {
    //TypeId of R -> Arc<dyn RequestHandler<R>>
    handlers: HashMap<TypeId, Box<dyn Any + Send + Sync>>
}

impl Mediator {
    pub fn new() -> Mediator {
        return Mediator::default();
    }

    pub fn register<R, H>(&mut self, handler: H) -> &mut Mediator
    where
        R: Request,
        H: RequestHandler<R> + 'static
    {
        let handler: Arc<dyn RequestHandler<R>> = Arc::new(handler);
        if self.handlers.insert(TypeId::of::<R>(), Box::new(handler)).is_some() {
            tracing::warn!(request = type_name::<R>(), "handler replaced");
        }
        return self;
    }

    pub fn len(&self) -> usize {
        return self.handlers.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.handlers.is_empty();
    }

    pub async fn send<R: Request>(&self, request: R) -> Result<R::Response, HandlerError> {
        let handler = self.handlers.get(&TypeId::of::<R>())
            .and_then(|h| h.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .cloned()
            .ok_or(HandlerError::Unregistered(type_name::<R>()))?;

        tracing::debug!(request = type_name::<R>(), "dispatching");
        return handler.handle(request).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping(u32);
    impl Request for Ping {
        type Response = u32;
    }

    struct Echo;
    impl Request for Echo {
        type Response = String;
    }

    struct Doubler;
    #[async_trait]
    impl RequestHandler<Ping> for Doubler {
        async fn handle(&self, request: Ping) -> Result<u32, HandlerError> {
            return Ok(request.0 * 2);
        }
    }

    struct Tripler;
    #[async_trait]
    impl RequestHandler<Ping> for Tripler {
        async fn handle(&self, request: Ping) -> Result<u32, HandlerError> {
            return Ok(request.0 * 3);
        }
    }

    struct Refuser;
    #[async_trait]
    impl RequestHandler<Echo> for Refuser {
        async fn handle(&self, _request: Echo) -> Result<String, HandlerError> {
            return Err(HandlerError::Rejected("not today".into()));
        }
    }

    #[tokio::test]
    async fn routes_to_the_registered_handler() {
        let mut mediator = Mediator::new();
        mediator.register::<Ping, _>(Doubler).register::<Echo, _>(Refuser);

        assert_eq!(mediator.send(Ping(21)).await.unwrap(), 42);
        assert!(matches!(mediator.send(Echo).await, Err(HandlerError::Rejected(msg)) if msg == "not today"));
        assert_eq!(mediator.len(), 2);
    }

    #[tokio::test]
    async fn unregistered_request_is_an_error() {
        let mediator = Mediator::new();

        assert!(mediator.is_empty());
        assert!(matches!(mediator.send(Ping(1)).await, Err(HandlerError::Unregistered(name)) if name.ends_with("Ping")));
    }

    #[tokio::test]
    async fn later_registration_wins() {
        let mut mediator = Mediator::new();
        mediator.register::<Ping, _>(Doubler);
        mediator.register::<Ping, _>(Tripler);

        assert_eq!(mediator.send(Ping(2)).await.unwrap(), 6);
        assert_eq!(mediator.len(), 1);
    }
}
