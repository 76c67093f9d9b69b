use super::{new_error_toast, new_success_toast};
use crate::auth::{Session, MIN_PASSWORD_LEN};
use crate::database;
use eframe::egui;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Default)]
pub struct AuthWindow {
    mode: Mode,
    email: String,
    password: String,
}

impl AuthWindow {
    fn submit(
        &mut self,
        conn: &mut database::Connection,
        session: &mut Session,
        toasts: &mut egui_toast::Toasts,
    ) -> bool {
        let result = match self.mode {
            Mode::SignIn => session.sign_in(conn, &self.email, &self.password),
            Mode::SignUp => session.sign_up(conn, &self.email, &self.password),
        };
        match result {
            Ok(user) => {
                if self.mode == Mode::SignUp {
                    toasts.add(new_success_toast(format!("Welcome, {}", user.email)));
                }
                self.password.clear();
                true
            }
            Err(error) => {
                toasts.add(new_error_toast(error.to_string()));
                false
            }
        }
    }

    /// Returns true once someone has signed in.
    pub fn update(
        &mut self,
        ctx: &egui::Context,
        conn: &mut database::Connection,
        session: &mut Session,
        toasts: &mut egui_toast::Toasts,
    ) -> bool {
        let mut submit = false;
        let title = match self.mode {
            Mode::SignIn => "Sign In",
            Mode::SignUp => "Sign Up",
        };
        egui::Window::new(title)
            .id(egui::Id::new("auth window"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .collapsible(false)
            .resizable([false, false])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("Kitchen Manager");
                    ui.label("Manage your recipes and ingredients with smart suggestions.");
                });
                ui.separator();
                egui::Grid::new("auth grid").show(ui, |ui| {
                    ui.label("Email:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.email)
                            .hint_text("Enter your email address"),
                    );
                    ui.end_row();

                    ui.label("Password:");
                    let r = ui.add(
                        egui::TextEdit::singleline(&mut self.password)
                            .password(true)
                            .hint_text("Enter your password"),
                    );
                    if r.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                    ui.end_row();
                });
                if self.mode == Mode::SignUp {
                    ui.small(format!(
                        "Passwords need at least {MIN_PASSWORD_LEN} characters."
                    ));
                }
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(title).clicked() {
                        submit = true;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.selectable_value(&mut self.mode, Mode::SignUp, "Sign Up");
                        ui.selectable_value(&mut self.mode, Mode::SignIn, "Sign In");
                    });
                });
            });

        submit && self.submit(conn, session, toasts)
    }
}
