//! Profile handlers: show and update the signed-in user's profile.

use storefront_core::{ProfileService, ProfileUpdate, RestGateway, UserProfile};

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand, ProfileUpdateArgs};
use crate::config::Backend;
use crate::error::CliError;
use crate::output;

fn detail(p: &UserProfile) -> String {
    let field = |v: Option<&str>| v.unwrap_or("-").to_owned();
    [
        format!("User:       {}", p.user_id),
        format!("First name: {}", field(p.firstname.as_deref())),
        format!("Last name:  {}", field(p.lastname.as_deref())),
        format!("Address:    {}", field(p.address.as_deref())),
        format!("Phone:      {}", field(p.phone.as_deref())),
    ]
    .join("\n")
}

fn print(profile: &UserProfile, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(&global.output, profile, detail, |p| p.user_id.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    args: ProfileArgs,
    backend: &Backend,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let Some(user_id) = backend.session.user_id() else {
        return Err(CliError::NotSignedIn);
    };
    let gateway = RestGateway::connect(
        &backend.base_url,
        &backend.api_key,
        &backend.session,
        &backend.transport,
    )?;
    let service = ProfileService::new(&backend.session, gateway);

    match args.command {
        ProfileCommand::Show => {
            let profile = service.load().await?.ok_or_else(|| CliError::NoProfile {
                user_id: user_id.to_string(),
            })?;
            print(&profile, global)
        }
        ProfileCommand::Update(ProfileUpdateArgs {
            firstname,
            lastname,
            address,
            phone,
        }) => {
            let update = ProfileUpdate::new(firstname, lastname, address, phone);
            if update.is_empty() {
                return Err(CliError::Validation {
                    field: "profile".into(),
                    reason: "pass at least one of --firstname, --lastname, --address, --phone"
                        .into(),
                });
            }
            let profile = service.save(&update).await?;
            print(&profile, global)
        }
    }
}
