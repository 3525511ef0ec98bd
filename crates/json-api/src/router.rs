//! App Router

use salvo::Router;

use crate::{admin, auth, carts, coupons, errors, foods, orders, payments, restaurants};

/// Every API route, mounted under `/api/v1`.
pub(crate) fn api_router() -> Router {
    Router::with_path("api/v1")
        .hoop(errors::handler)
        .push(Router::with_path("restaurant").get(restaurants::index::handler))
        .push(
            Router::with_path("food")
                .get(foods::index::handler)
                .push(Router::with_path("search").get(foods::search::handler))
                .push(Router::with_path("{food}").get(foods::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(cart_router())
                .push(coupons_router())
                .push(order_router())
                .push(
                    Router::with_path("restaurant/orders")
                        .get(restaurants::orders::handler)
                        .push(Router::with_path("{order}").patch(restaurants::update_order::handler)),
                )
                .push(
                    Router::with_path("payment")
                        .push(
                            Router::with_path("create-checkout-session")
                                .post(payments::checkout::handler),
                        )
                        .push(
                            Router::with_path("session-status")
                                .get(payments::session_status::handler),
                        ),
                )
                .push(
                    Router::with_path("admin/orders")
                        .get(admin::orders::handler)
                        .push(Router::with_path("total-amount").get(admin::total_amount::handler)),
                ),
        )
}

fn cart_router() -> Router {
    Router::with_path("cart")
        .get(carts::get::handler)
        .push(Router::with_path("add").post(carts::add::handler))
        .push(Router::with_path("remove").delete(carts::remove::handler))
        .push(Router::with_path("update-item").patch(carts::update::handler))
}

fn coupons_router() -> Router {
    Router::with_path("coupons")
        .get(coupons::index::handler)
        .push(Router::with_path("create").post(coupons::create::handler))
        .push(Router::with_path("update").patch(coupons::update::handler))
        .push(Router::with_path("apply").post(coupons::apply::handler))
        .push(Router::with_path("cancel").delete(coupons::cancel::handler))
}

/// Literal segments are pushed before `{order}` so they are not taken for an order id.
fn order_router() -> Router {
    Router::with_path("order")
        .push(Router::with_path("create").post(orders::create::handler))
        .push(Router::with_path("my-orders").get(orders::index::handler))
        .push(Router::with_path("cancel/{order}").patch(orders::cancel::handler))
        .push(Router::with_path("update/status").patch(orders::update_status::handler))
        .push(
            Router::with_path("{order}").get(orders::get::handler).push(
                Router::with_path("restaurants/{restaurant}/cancel")
                    .patch(orders::cancel_restaurant::handler),
            ),
        )
}
