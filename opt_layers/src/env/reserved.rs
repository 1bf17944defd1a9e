//! Variable names reserved by the operating system or standard shells.
//!
//! Options may still use these names; validation only warns about them.

/// Variables with special meaning to POSIX utilities and shells.
pub(super) const POSIX: &[&str] = &[
    "ARFLAGS",
    "CC",
    "CDPATH",
    "CFLAGS",
    "CHARSET",
    "COLUMNS",
    "DATEMSK",
    "DEAD",
    "EDITOR",
    "ENV",
    "EXINIT",
    "FC",
    "FCEDIT",
    "FFLAGS",
    "GET",
    "GFLAGS",
    "HISTFILE",
    "HISTORY",
    "HISTSIZE",
    "HOME",
    "IFS",
    "LANG",
    "LC_ALL",
    "LC_COLLATE",
    "LC_CTYPE",
    "LC_MESSAGES",
    "LC_MONETARY",
    "LC_NUMERIC",
    "LC_TIME",
    "LDFLAGS",
    "LEX",
    "LFLAGS",
    "LINENO",
    "LINES",
    "LISTER",
    "LOGNAME",
    "LPDEST",
    "MAIL",
    "MAILCHECK",
    "MAILER",
    "MAILPATH",
    "MAILRC",
    "MAKEFLAGS",
    "MAKESHELL",
    "MANPATH",
    "MBOX",
    "MORE",
    "MSGVERB",
    "NLSPATH",
    "NPROC",
    "OLDPWD",
    "OPTARG",
    "OPTERR",
    "OPTIND",
    "PAGER",
    "PATH",
    "PPID",
    "PRINTER",
    "PROCLANG",
    "PROJECTDIR",
    "PS1",
    "PS2",
    "PS3",
    "PS4",
    "PWD",
    "RANDOM",
    "SECONDS",
    "SHELL",
    "TERM",
    "TERMCAP",
    "TERMINFO",
    "TMPDIR",
    "TZ",
    "USER",
    "VISUAL",
    "YACC",
    "YFLAGS",
];

/// Variables predefined by Windows. Compared case-insensitively.
pub(super) const WINDOWS: &[&str] = &[
    "=C:",
    "=D:",
    "=EXITCODE",
    "=EXITCODEASCII",
    "ALLUSERSPROFILE",
    "APPDATA",
    "CD",
    "CLIENTNAME",
    "CMDCMDLINE",
    "CMDEXTVERSION",
    "COMMONPROGRAMFILES",
    "COMMONPROGRAMFILES(X86)",
    "COMMONPROGRAMW6432",
    "COMPUTERNAME",
    "COMSPEC",
    "DATE",
    "DPATH",
    "ERRORLEVEL",
    "FIRMWARE_TYPE",
    "FPS_BROWSER_APP_PROFILE_STRING",
    "FPS_BROWSER_USER_PROFILE_STRING",
    "HIGHESTNUMANODENUMBER",
    "HOMEDRIVE",
    "HOMEPATH",
    "HOMESHARE",
    "KEYS",
    "LOCALAPPDATA",
    "LOGONSERVER",
    "NTVERSION",
    "NUMBER_OF_PROCESSORS",
    "OS",
    "PATH",
    "PATHEXT",
    "PROCESSOR_ARCHITECTURE",
    "PROCESSOR_ARCHITEW6432",
    "PROCESSOR_IDENTIFIER",
    "PROCESSOR_LEVEL",
    "PROCESSOR_REVISION",
    "PROGRAMDATA",
    "PROGRAMFILES",
    "PROGRAMFILES(X86)",
    "PROGRAMW6432",
    "PROMPT",
    "PSEXECUTIONPOLICYPREFERENCE",
    "PSMODULEPATH",
    "PUBLIC",
    "RANDOM",
    "SESSIONNAME",
    "SYSTEMDRIVE",
    "SYSTEMROOT",
    "TEMP",
    "TIME",
    "TMP",
    "USERDNSDOMAIN",
    "USERDOMAIN",
    "USERDOMAIN_ROAMINGPROFILE",
    "USERNAME",
    "USERPROFILE",
    "WINDIR",
    "__APPDIR__",
    "__CD__",
    "__COMPAT_LAYER",
];
