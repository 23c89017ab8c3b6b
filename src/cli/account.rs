//! Account commands

use clap::Args;
use storefront::{
    Storefront,
    auth::{ProfileUpdate, UserProfile},
};

use super::{error_chain, say};

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Email address
    #[arg(long)]
    email: String,

    /// Password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct SignupArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Email address
    #[arg(long)]
    email: String,

    /// Password
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Args)]
pub(crate) struct ProfileArgs {
    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// New email address
    #[arg(long)]
    email: Option<String>,

    /// New phone number
    #[arg(long)]
    phone: Option<String>,

    /// New address
    #[arg(long)]
    address: Option<String>,
}

pub(crate) async fn login(store: &Storefront, args: &LoginArgs) -> Result<(), String> {
    let user = store
        .auth
        .login(&args.email, &args.password)
        .await
        .map_err(|error| error_chain(&error))?;

    print_user(&user)
}

pub(crate) async fn signup(store: &Storefront, args: &SignupArgs) -> Result<(), String> {
    let user = store
        .auth
        .signup(&args.name, &args.email, &args.password)
        .await
        .map_err(|error| error_chain(&error))?;

    print_user(&user)
}

pub(crate) async fn update_profile(store: &Storefront, args: ProfileArgs) -> Result<(), String> {
    let user = store
        .auth
        .update_profile(ProfileUpdate {
            name: args.name,
            email: args.email,
            phone: args.phone,
            address: args.address,
        })
        .await
        .map_err(|error| error_chain(&error))?;

    print_user(&user)
}

pub(crate) fn logout(store: &Storefront) -> Result<(), String> {
    store.auth.logout();

    say("signed out")
}

pub(crate) fn whoami(store: &Storefront) -> Result<(), String> {
    match store.auth.current_user() {
        Some(user) => print_user(&user),
        None => say("not signed in"),
    }
}

fn print_user(user: &UserProfile) -> Result<(), String> {
    say(format_args!("user_id: {}", user.id))?;
    say(format_args!("name: {}", user.name))?;
    say(format_args!("email: {}", user.email))?;

    if !user.phone.is_empty() {
        say(format_args!("phone: {}", user.phone))?;
    }

    if !user.address.is_empty() {
        say(format_args!("address: {}", user.address))?;
    }

    Ok(())
}
