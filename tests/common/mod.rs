use assert_cmd::Command;

pub fn lectern_cmd() -> Command {
    let mut cmd = Command::cargo_bin("lectern").unwrap();
    cmd.env_remove("LECTERN_ROOT");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd
}
