use std::{
    fmt,
    fmt::{Debug, Display},
    str::FromStr,
};

use chrono::{DateTime, Duration, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use ss_common::Centavos;
use thiserror::Error;
use uuid::Uuid;

//--------------------------------------        OrderId        -------------------------------------------------------
/// A lightweight wrapper around the string id assigned to an order at creation.
#[derive(Debug, Clone, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    /// Generates a fresh random order id.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for OrderId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//--------------------------------------      OrderStatus      -------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// The order has been accepted and is waiting for the dispatch sweep to pick it up.
    Pending,
    /// The order has been delivered to the notification receiver and acknowledged.
    Processed,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Processed => write!(f, "PROCESSED"),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid order status: {value}. But this conversion cannot fail. Defaulting to Pending");
            OrderStatus::Pending
        })
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct StatusConversionError(String);

impl FromStr for OrderStatus {
    type Err = StatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PROCESSED" => Ok(Self::Processed),
            s => Err(StatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------       OrderItem       -------------------------------------------------------
/// A single line item of an order. Items are immutable once the order has been created.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub producto: String,
    pub talla: String,
    pub color: String,
    pub cantidad: i64,
    pub precio_unitario: Centavos,
}

impl OrderItem {
    pub fn subtotal(&self) -> Centavos {
        self.precio_unitario * self.cantidad
    }
}

//--------------------------------------       NewOrder        -------------------------------------------------------
/// The input for creating an order. The id, total and timestamp are assigned by the store at insertion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub cliente: String,
    pub items: Vec<OrderItem>,
}

impl NewOrder {
    pub fn new<S: Into<String>>(cliente: S, items: Vec<OrderItem>) -> Self {
        Self { cliente: cliente.into(), items }
    }

    /// The order total. This is computed exactly once, when the order is inserted into the store.
    pub fn total(&self) -> Centavos {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}

//--------------------------------------         Order         -------------------------------------------------------
/// A full order record, including its line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub cliente: String,
    pub items: Vec<OrderItem>,
    pub total: Centavos,
    pub estado: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn from_parts(summary: OrderSummary, items: Vec<OrderItem>) -> Self {
        let OrderSummary { id, cliente, total, estado, created_at } = summary;
        Self { id, cliente, items, total, estado, created_at }
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary {
            id: self.id.clone(),
            cliente: self.cliente.clone(),
            total: self.total,
            estado: self.estado,
            created_at: self.created_at,
        }
    }
}

//--------------------------------------     OrderSummary      -------------------------------------------------------
/// The row shape used by the status listings and the list-view cache entries. It is everything an order carries
/// except its line items.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub cliente: String,
    pub total: Centavos,
    pub estado: OrderStatus,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------         User          -------------------------------------------------------
/// A registered user account. The password hash never appears in serialized output.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: String,
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------       NewUser         -------------------------------------------------------
/// A registration request. The raw password is hashed before anything is written to the store.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub nombre: String,
    pub email: String,
    pub password: String,
}

impl Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser").field("nombre", &self.nombre).field("email", &self.email).field("password", &"****").finish()
    }
}

//--------------------------------------      AuthToken        -------------------------------------------------------
/// An opaque bearer token with a hard expiry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthToken {
    pub token: String,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    /// Issues a fresh token for the given user, valid for `lifetime` from now.
    pub fn issue(user_id: &str, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            expires_at: now + lifetime,
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
