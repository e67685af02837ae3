use std::fmt;

/// Status code used for errors that did not originate from the native library
pub const UNDEFINED_CODE: i32 = -1;

/// Status codes reported by libindy, either as the immediate return value of
/// an entry point or as the `err` argument of a completion callback.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success = 0,

    CommonInvalidParam1 = 100,
    CommonInvalidParam2 = 101,
    CommonInvalidParam3 = 102,
    CommonInvalidParam4 = 103,
    CommonInvalidParam5 = 104,
    CommonInvalidParam6 = 105,
    CommonInvalidParam7 = 106,
    CommonInvalidParam8 = 107,
    CommonInvalidParam9 = 108,
    CommonInvalidParam10 = 109,
    CommonInvalidParam11 = 110,
    CommonInvalidParam12 = 111,
    CommonInvalidState = 112,
    CommonInvalidStructure = 113,
    CommonIOError = 114,

    WalletInvalidHandle = 200,
    WalletUnknownTypeError = 201,
    WalletTypeAlreadyRegisteredError = 202,
    WalletAlreadyExistsError = 203,
    WalletNotFoundError = 204,
    WalletIncompatiblePoolError = 205,
    WalletAlreadyOpenedError = 206,
    WalletAccessFailed = 207,

    PoolLedgerNotCreatedError = 300,
    PoolLedgerInvalidPoolHandle = 301,
    PoolLedgerTerminated = 302,
    LedgerNoConsensusError = 303,
    LedgerInvalidTransaction = 304,
    LedgerSecurityError = 305,
    PoolLedgerConfigAlreadyExistsError = 306,
    PoolLedgerTimeout = 307,

    AnoncredsRevocationRegistryFullError = 400,
    AnoncredsInvalidUserRevocId = 401,
    AnoncredsMasterSecretDuplicateNameError = 404,
    AnoncredsProofRejected = 405,
    AnoncredsCredentialRevoked = 406,
    AnoncredsCredDefAlreadyExistsError = 407,

    UnknownCryptoTypeError = 500,

    DidAlreadyExistsError = 600,
}

/// Coarse grouping of status codes by the subsystem that reported them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Success,
    Common,
    Wallet,
    Ledger,
    Anoncreds,
    Crypto,
    Did,
    /// Not a native status (local validation, decoding, delivery failures)
    Undefined,
    /// A native status outside the known table
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Success => "success",
            ErrorCategory::Common => "common",
            ErrorCategory::Wallet => "wallet",
            ErrorCategory::Ledger => "ledger",
            ErrorCategory::Anoncreds => "anoncreds",
            ErrorCategory::Crypto => "crypto",
            ErrorCategory::Did => "did",
            ErrorCategory::Undefined => "undefined",
            ErrorCategory::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl ErrorCode {
    /// Look up a raw status in the known table
    pub fn from_code(code: i32) -> Option<ErrorCode> {
        use ErrorCode::*;
        let known = match code {
            0 => Success,
            100 => CommonInvalidParam1,
            101 => CommonInvalidParam2,
            102 => CommonInvalidParam3,
            103 => CommonInvalidParam4,
            104 => CommonInvalidParam5,
            105 => CommonInvalidParam6,
            106 => CommonInvalidParam7,
            107 => CommonInvalidParam8,
            108 => CommonInvalidParam9,
            109 => CommonInvalidParam10,
            110 => CommonInvalidParam11,
            111 => CommonInvalidParam12,
            112 => CommonInvalidState,
            113 => CommonInvalidStructure,
            114 => CommonIOError,
            200 => WalletInvalidHandle,
            201 => WalletUnknownTypeError,
            202 => WalletTypeAlreadyRegisteredError,
            203 => WalletAlreadyExistsError,
            204 => WalletNotFoundError,
            205 => WalletIncompatiblePoolError,
            206 => WalletAlreadyOpenedError,
            207 => WalletAccessFailed,
            300 => PoolLedgerNotCreatedError,
            301 => PoolLedgerInvalidPoolHandle,
            302 => PoolLedgerTerminated,
            303 => LedgerNoConsensusError,
            304 => LedgerInvalidTransaction,
            305 => LedgerSecurityError,
            306 => PoolLedgerConfigAlreadyExistsError,
            307 => PoolLedgerTimeout,
            400 => AnoncredsRevocationRegistryFullError,
            401 => AnoncredsInvalidUserRevocId,
            404 => AnoncredsMasterSecretDuplicateNameError,
            405 => AnoncredsProofRejected,
            406 => AnoncredsCredentialRevoked,
            407 => AnoncredsCredDefAlreadyExistsError,
            500 => UnknownCryptoTypeError,
            600 => DidAlreadyExistsError,
            _ => return None,
        };
        Some(known)
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn category(self) -> ErrorCategory {
        match self as i32 {
            0 => ErrorCategory::Success,
            100..=199 => ErrorCategory::Common,
            200..=299 => ErrorCategory::Wallet,
            300..=399 => ErrorCategory::Ledger,
            400..=499 => ErrorCategory::Anoncreds,
            500..=599 => ErrorCategory::Crypto,
            _ => ErrorCategory::Did,
        }
    }

    pub fn description(self) -> &'static str {
        use ErrorCode::*;
        match self {
            Success => "Success",
            CommonInvalidParam1 => "Caller passed invalid value as param 1 (null, invalid json and etc..)",
            CommonInvalidParam2 => "Caller passed invalid value as param 2 (null, invalid json and etc..)",
            CommonInvalidParam3 => "Caller passed invalid value as param 3 (null, invalid json and etc..)",
            CommonInvalidParam4 => "Caller passed invalid value as param 4 (null, invalid json and etc..)",
            CommonInvalidParam5 => "Caller passed invalid value as param 5 (null, invalid json and etc..)",
            CommonInvalidParam6 => "Caller passed invalid value as param 6 (null, invalid json and etc..)",
            CommonInvalidParam7 => "Caller passed invalid value as param 7 (null, invalid json and etc..)",
            CommonInvalidParam8 => "Caller passed invalid value as param 8 (null, invalid json and etc..)",
            CommonInvalidParam9 => "Caller passed invalid value as param 9 (null, invalid json and etc..)",
            CommonInvalidParam10 => "Caller passed invalid value as param 10 (null, invalid json and etc..)",
            CommonInvalidParam11 => "Caller passed invalid value as param 11 (null, invalid json and etc..)",
            CommonInvalidParam12 => "Caller passed invalid value as param 12 (null, invalid json and etc..)",
            CommonInvalidState => "Invalid library state was detected in runtime. It signals library bug",
            CommonInvalidStructure => {
                "Object (json, config, key, credential and etc...) passed by library caller has invalid structure"
            }
            CommonIOError => "IO Error",
            WalletInvalidHandle => "Caller passed invalid wallet handle",
            WalletUnknownTypeError => "Unknown type of wallet was passed on create_wallet",
            WalletTypeAlreadyRegisteredError => "Attempt to register already existing wallet type",
            WalletAlreadyExistsError => "Attempt to create wallet with name used for another exists wallet",
            WalletNotFoundError => "Requested entity id isn't present in wallet",
            WalletIncompatiblePoolError => "Trying to use wallet with pool that has different name",
            WalletAlreadyOpenedError => "Trying to open wallet that was opened already",
            WalletAccessFailed => "Attempt to open encrypted wallet with invalid credentials",
            PoolLedgerNotCreatedError => "Trying to open pool ledger that wasn't created before",
            PoolLedgerInvalidPoolHandle => "Caller passed invalid pool ledger handle",
            PoolLedgerTerminated => "Pool ledger terminated",
            LedgerNoConsensusError => "No consensus during ledger operation",
            LedgerInvalidTransaction => "Attempt to parse invalid transaction response",
            LedgerSecurityError => "Attempt to send transaction without the necessary privileges",
            PoolLedgerConfigAlreadyExistsError => {
                "Attempt to create pool ledger config with name used for another existing pool"
            }
            PoolLedgerTimeout => "Timeout for action",
            AnoncredsRevocationRegistryFullError => {
                "Revocation registry is full and creation of new registry is necessary"
            }
            AnoncredsInvalidUserRevocId => "Invalid user revocation ID",
            AnoncredsMasterSecretDuplicateNameError => "Attempt to generate master secret with duplicated name",
            AnoncredsProofRejected => "Proof was rejected",
            AnoncredsCredentialRevoked => "Credentials were revoked",
            AnoncredsCredDefAlreadyExistsError => {
                "Attempt to create credential definition with duplicated did schema pair"
            }
            UnknownCryptoTypeError => "Unknown format of DID entity keys",
            DidAlreadyExistsError => "Attempt to create duplicate did",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Human-readable description for any raw status, known or not
pub fn describe(code: i32) -> String {
    match ErrorCode::from_code(code) {
        Some(known) => known.description().to_string(),
        None => format!("unknown error: {code}"),
    }
}

/// Category for any raw status, known or not
pub fn categorize(code: i32) -> ErrorCategory {
    match ErrorCode::from_code(code) {
        Some(known) => known.category(),
        None if code == UNDEFINED_CODE => ErrorCategory::Undefined,
        None => ErrorCategory::Unknown,
    }
}
