//! Query fragments shared by the SQL store adapters.
//!
//! Every user-supplied value ends up as a bound parameter; none of these functions build SQL text.

use diesel::dsl::{Asc, Eq, Filter, Find, Order};
use diesel::{ExpressionMethods, QueryDsl};

use crate::schema::pokemon;

/// All Pokemon, ordered by ascending id.
pub type AllById = Order<pokemon::table, Asc<pokemon::id>>;

/// The Pokemon with a given id.
pub type ById = Find<pokemon::table, i64>;

/// The Pokemon with a given name (exact match).
pub type ByName<'a> = Filter<pokemon::table, Eq<pokemon::name, &'a str>>;

pub fn all_by_id() -> AllById {
    pokemon::table.order(pokemon::id.asc())
}

pub fn by_id(pokemon_id: i64) -> ById {
    pokemon::table.find(pokemon_id)
}

pub fn by_name(pokemon_name: &str) -> ByName<'_> {
    pokemon::table.filter(pokemon::name.eq(pokemon_name))
}
