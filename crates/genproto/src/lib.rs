pub mod account {
    include!("gen/account.rs");
}

pub mod order {
    include!("gen/order.rs");
}

pub mod product {
    include!("gen/product.rs");
}
