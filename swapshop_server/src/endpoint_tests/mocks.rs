use mockall::mock;
use swapshop_engine::{
    db_types::{AuthToken, NewOrder, NewUser, Order, OrderId, OrderStatus, OrderSummary, User},
    traits::{AuthApiError, AuthManagement, OrderManagement, OrderStoreError},
};

mock! {
    pub OrderManager {}

    impl OrderManagement for OrderManager {
        async fn insert_order(&self, order: NewOrder) -> Result<Order, OrderStoreError>;
        async fn fetch_order_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderStoreError>;
        async fn fetch_orders_by_status(&self, status: OrderStatus) -> Result<Vec<OrderSummary>, OrderStoreError>;
        async fn update_order_status(&self, id: &OrderId, status: OrderStatus)
            -> Result<Option<OrderSummary>, OrderStoreError>;
    }
}

mock! {
    pub AuthManager {}

    impl AuthManagement for AuthManager {
        async fn insert_user(&self, user: &NewUser, password_hash: &str) -> Result<User, AuthApiError>;
        async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>, AuthApiError>;
        async fn insert_auth_token(&self, token: &AuthToken) -> Result<(), AuthApiError>;
        async fn fetch_auth_token(&self, token: &str) -> Result<Option<AuthToken>, AuthApiError>;
        async fn purge_expired_tokens(&self) -> Result<u64, AuthApiError>;
    }
}
