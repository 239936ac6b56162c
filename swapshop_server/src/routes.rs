//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Any long, non-cpu-bound operation (e.g. I/O, database operations,
//! etc.) must be expressed as a future or asynchronous function, so that the worker can service other requests while
//! it waits.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use swapshop_engine::{
    db_types::{NewOrder, NewUser, OrderId},
    traits::{AuthManagement, OrderManagement},
    AuthApi,
    OrderFlowApi,
};

use crate::{
    data_objects::{AuthResponse, JsonResponse, LoginParams},
    errors::ServerError,
    order_request::OrderRequest,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------

route!(create_order => Post "/orders" impl OrderManagement);
/// Route handler for the order creation endpoint
///
/// The request body is validated at the boundary (at least one item, `cantidad` of one or more, a positive
/// `precio_unitario`) before it reaches the order flow. The created order is returned in full, with its computed
/// total, an estado of `PENDING`, and its creation timestamp.
pub async fn create_order<B: OrderManagement>(
    body: web::Json<OrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ New order request from {}", request.cliente);
    let new_order = NewOrder::try_from(request)?;
    let order = api.create_order(new_order).await.map_err(|e| {
        debug!("💻️ Could not create order. {e}");
        e
    })?;
    Ok(HttpResponse::Ok().json(order))
}

route!(pending_orders => Get "/orders/pending" impl OrderManagement);
/// Route handler for the pending order listing
///
/// Returns the summaries of every order still waiting for dispatch, newest first. The dispatch poller drives its
/// sweeps off this endpoint.
pub async fn pending_orders<B: OrderManagement>(
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET pending orders");
    let orders = api.pending_orders().await.map_err(|e| {
        debug!("💻️ Could not fetch pending orders. {e}");
        e
    })?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(processed_orders => Get "/orders/processed" impl OrderManagement);
/// Route handler for the processed order listing. The same shape as `/orders/pending`, filtered to orders that
/// have already been dispatched.
pub async fn processed_orders<B: OrderManagement>(
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET processed orders");
    let orders = api.processed_orders().await.map_err(|e| {
        debug!("💻️ Could not fetch processed orders. {e}");
        e
    })?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(order_by_id => Get "/orders/{id}" impl OrderManagement);
/// Route handler for fetching a single order by its id. Returns the full order, including line items, or a 404 if
/// no such order exists.
pub async fn order_by_id<B: OrderManagement>(
    path: web::Path<OrderId>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    debug!("💻️ GET order_by_id({id})");
    let order = api
        .order_by_id(&id)
        .await
        .map_err(|e| {
            debug!("💻️ Could not fetch order. {e}");
            e
        })?
        .ok_or_else(|| ServerError::NoRecordFound(format!("Order {id}")))?;
    Ok(HttpResponse::Ok().json(order))
}

route!(mark_as_processed => Post "/orders/{id}/mark-processed" impl OrderManagement);
/// Route handler for transitioning an order to `PROCESSED`
///
/// The transition is one-way and happens at most once. A repeated call for the same order, like a call for an id
/// that never existed, answers 404.
pub async fn mark_as_processed<B: OrderManagement>(
    path: web::Path<OrderId>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    info!("💻️ Marking order {id} as processed");
    let updated = api.mark_as_processed(&id).await.map_err(|e| {
        debug!("💻️ Could not mark order {id} as processed. {e}");
        e
    })?;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Order {} is processed.", updated.id))))
}

//----------------------------------------------   Auth  ----------------------------------------------------

route!(register => Post "/auth/register" impl AuthManagement);
/// Route handler for the registration endpoint
///
/// Creates a user account and signs it in, answering with the account and a fresh bearer token. Registering an
/// email that is already taken answers 400.
pub async fn register<B: AuthManagement>(
    body: web::Json<NewUser>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let new_user = body.into_inner();
    debug!("💻️ Registration request for {}", new_user.email);
    let (user, token) = api.register(new_user).await.map_err(|e| {
        debug!("💻️ Could not register user. {e}");
        e
    })?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(user, token)))
}

route!(login => Post "/auth/login" impl AuthManagement);
/// Route handler for the login endpoint. A wrong password and an unknown email both answer 401 with the same body.
pub async fn login<B: AuthManagement>(
    body: web::Json<LoginParams>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let LoginParams { email, password } = body.into_inner();
    debug!("💻️ Login request for {email}");
    let (user, token) = api.login(&email, &password).await.map_err(|e| {
        debug!("💻️ Login failed for {email}. {e}");
        e
    })?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(user, token)))
}
