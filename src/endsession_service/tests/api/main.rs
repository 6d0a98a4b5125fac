mod health;
mod helpers;
mod logout;
