//! Test Helpers
//!
//! Users, restaurants and foods are owned by other systems, so fixtures write them directly.

use sqlx::query;

use crate::{
    domain::{
        catalog::models::{FoodUuid, RestaurantUuid},
        users::models::UserUuid,
    },
    test::TestContext,
};

pub(crate) async fn create_user(ctx: &TestContext) -> Result<UserUuid, sqlx::Error> {
    let user = UserUuid::new();

    query("INSERT INTO users (uuid, name, mobile) VALUES ($1, $2, $3)")
        .bind(user.into_uuid())
        .bind("Asha")
        .bind("+919800000000")
        .execute(ctx.db.pool())
        .await?;

    Ok(user)
}

pub(crate) async fn create_restaurant(
    ctx: &TestContext,
    name: &str,
) -> Result<RestaurantUuid, sqlx::Error> {
    let restaurant = RestaurantUuid::new();

    query("INSERT INTO restaurants (uuid, name) VALUES ($1, $2)")
        .bind(restaurant.into_uuid())
        .bind(name)
        .execute(ctx.db.pool())
        .await?;

    Ok(restaurant)
}

pub(crate) async fn create_food(
    ctx: &TestContext,
    restaurant: RestaurantUuid,
    name: &str,
    price: i64,
) -> Result<FoodUuid, sqlx::Error> {
    let food = FoodUuid::new();

    query("INSERT INTO foods (uuid, restaurant_uuid, name, price) VALUES ($1, $2, $3, $4)")
        .bind(food.into_uuid())
        .bind(restaurant.into_uuid())
        .bind(name)
        .bind(price)
        .execute(ctx.db.pool())
        .await?;

    Ok(food)
}

pub(crate) async fn set_food_price(
    ctx: &TestContext,
    food: FoodUuid,
    price: i64,
) -> Result<(), sqlx::Error> {
    query("UPDATE foods SET price = $2, updated_at = now() WHERE uuid = $1")
        .bind(food.into_uuid())
        .bind(price)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

pub(crate) async fn delete_food(ctx: &TestContext, food: FoodUuid) -> Result<(), sqlx::Error> {
    query("DELETE FROM foods WHERE uuid = $1")
        .bind(food.into_uuid())
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

pub(crate) async fn set_food_categories(
    ctx: &TestContext,
    food: FoodUuid,
    categories: &[&str],
) -> Result<(), sqlx::Error> {
    query("UPDATE foods SET categories = $2, updated_at = now() WHERE uuid = $1")
        .bind(food.into_uuid())
        .bind(categories)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}
