//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{AuthDelays, AuthError, AuthService, LocalAuthService, ProfileUpdate, UserProfile},
    cart::{CartEvent, CartLine, CartObserver, CartStore, PricedLine},
    catalog::{Catalog, CatalogError, SortOrder},
    checkout::{
        Checkout, CheckoutError, CheckoutStage, MaskedPayment, PaymentInfo, ShippingInfo,
        ValidationErrors,
    },
    context::{Storefront, StorefrontSettings},
    orders::{Order, OrderError, OrderHistory, OrderId, OrderLine, OrderStatus},
    pricing::{Amount, OrderTotals, PricingError, PricingPolicy},
    products::{Product, ProductId},
    storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageKey},
    wishlist::{Wishlist, WishlistError},
};
