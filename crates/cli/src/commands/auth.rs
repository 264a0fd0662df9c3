use clap::Args;

use crate::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Staff account email
    #[arg(long)]
    email: String,

    /// Staff account password
    #[arg(long, env = "CANTEEN_PASSWORD", hide_env_values = true)]
    password: String,
}

pub(crate) async fn login(context: &AppContext, args: LoginArgs) -> Result<(), String> {
    let user = context
        .session
        .login(&args.email, &args.password)
        .await
        .map_err(|error| format!("login failed: {error}"))?;

    println!("logged in as {} ({})", user.name, user.role);

    Ok(())
}

pub(crate) async fn logout(context: &AppContext) -> Result<(), String> {
    context
        .session
        .logout()
        .await
        .map_err(|error| format!("logout failed: {error}"))?;

    println!("logged out");

    Ok(())
}

pub(crate) async fn whoami(context: &AppContext) -> Result<(), String> {
    let user = context
        .session
        .current_user()
        .await
        .map_err(|error| error.to_string())?;

    println!("name: {}", user.name);
    println!("email: {}", user.email);
    println!("role: {}", user.role);
    println!("active: {}", user.is_active);

    Ok(())
}
