//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use platter_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartItem},
        },
        catalog::{
            MockCatalogService,
            models::{Food, FoodUuid, Restaurant, RestaurantUuid},
        },
        coupons::MockCouponsService,
        orders::{
            MockOrdersService,
            models::{Order, OrderItem, OrderStatus, OrderUuid, RestaurantOrder},
        },
        users::models::UserUuid,
    },
    payments::MockPaymentsService,
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{errors, extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_RESTAURANT_UUID: RestaurantUuid = RestaurantUuid::from_uuid(Uuid::nil());

/// Service mocks; anything left at its default fails the test if it is called.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) catalog: MockCatalogService,
    pub(crate) carts: MockCartsService,
    pub(crate) coupons: MockCouponsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) payments: MockPaymentsService,
    pub(crate) auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            coupons: Arc::new(self.coupons),
            orders: Arc::new(self.orders),
            payments: Arc::new(self.payments),
            auth: Arc::new(self.auth),
        })
    }
}

struct InjectPrincipal(Principal);

#[salvo::handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// A service with the mocks injected and, when given, an already authenticated principal.
pub(crate) fn service(mocks: Mocks, principal: Option<Principal>, route: Router) -> Service {
    let mut router = Router::new()
        .hoop(errors::handler)
        .hoop(inject(mocks.into_state()));

    if let Some(principal) = principal {
        router = router.hoop(InjectPrincipal(principal));
    }

    Service::new(router.push(route))
}

pub(crate) fn as_user() -> Option<Principal> {
    Some(Principal::user(TEST_USER_UUID))
}

pub(crate) fn as_restaurant() -> Option<Principal> {
    Some(Principal::restaurant(TEST_RESTAURANT_UUID))
}

pub(crate) fn as_admin() -> Option<Principal> {
    Some(Principal::admin(Uuid::nil()))
}

pub(crate) fn make_cart(items: &[(FoodUuid, u32)], total: u64) -> Cart {
    let mut cart = Cart::new(TEST_USER_UUID);

    cart.items = items
        .iter()
        .map(|&(food, quantity)| CartItem::new(food, quantity))
        .collect();
    cart.total = total;
    cart.version = 1;
    cart.created_at = Timestamp::UNIX_EPOCH;
    cart.updated_at = Timestamp::UNIX_EPOCH;

    cart
}

pub(crate) fn make_restaurant(uuid: RestaurantUuid) -> Restaurant {
    Restaurant {
        uuid,
        name: "Dosa Point".to_string(),
        location: "Kochi".to_string(),
        description: "South Indian breakfast".to_string(),
        mobile: "+914840000000".to_string(),
        image: None,
        categories: vec!["breakfast".to_string()],
        making_time: "20 min".to_string(),
        is_open: true,
    }
}

pub(crate) fn make_food(uuid: FoodUuid, restaurant: RestaurantUuid, price: u64) -> Food {
    Food {
        uuid,
        restaurant_uuid: restaurant,
        name: "Masala Dosa".to_string(),
        description: "Crisp dosa with potato masala".to_string(),
        price,
        categories: vec!["breakfast".to_string()],
        image: None,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, statuses: &[OrderStatus]) -> Order {
    let restaurants: Vec<RestaurantOrder> = statuses
        .iter()
        .enumerate()
        .map(|(index, &status)| RestaurantOrder {
            restaurant_uuid: if index == 0 {
                TEST_RESTAURANT_UUID
            } else {
                RestaurantUuid::new()
            },
            items: vec![OrderItem {
                food_uuid: FoodUuid::new(),
                quantity: 2,
                price: 100,
            }],
            restaurant_total: 200,
            status,
        })
        .collect();

    Order {
        uuid,
        user_uuid: TEST_USER_UUID,
        total: restaurants.iter().map(|sub_order| sub_order.restaurant_total).sum(),
        restaurants,
        status: OrderStatus::Pending,
        version: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
